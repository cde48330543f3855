#![allow(missing_docs)]

//! Line-based input and the retry loops behind every decision point.
//!
//! Each answer is one full line, so a malformed answer is consumed whole and the
//! next read starts clean.

use std::{collections::VecDeque, io::BufRead};

use tracing::debug;

use crate::{
    errors::GameError,
    market::Market,
    models::{Action, Cargo, Port, TradeKind, Upgrade, CANCEL_ID, NO_ID, YES_ID},
    screen::{Prompt, Renderer},
    state::GameState,
    validation::{self, Rejection},
};

/// Source of player answers, one line at a time.
pub trait InputSource {
    /// Next line without its line terminator, or `None` once input is exhausted.
    fn read_line(&mut self) -> std::io::Result<Option<String>>;
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        (**self).read_line()
    }
}

/// Reads answers from any buffered reader, typically locked stdin.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Canned answers, used to drive sessions without a terminal.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Parse a whole line as a signed integer.
pub fn parse_integer(line: &str) -> Result<i64, Rejection> {
    line.trim().parse().map_err(|_| Rejection::NotAnInteger)
}

/// Parse a line holding exactly one character, normalised to upper case.
pub fn parse_letter(line: &str) -> Result<char, Rejection> {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter.to_ascii_uppercase()),
        _ => Err(Rejection::UnknownOption),
    }
}

/// Outcome of a menu that can be backed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    Picked(T),
    Cancel,
}

/// Asks questions until a valid answer arrives.
#[derive(Debug)]
pub struct Prompter<I, R> {
    input: I,
    renderer: R,
}

impl<I: InputSource, R: Renderer> Prompter<I, R> {
    pub fn new(input: I, renderer: R) -> Self {
        Self { input, renderer }
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Show `prompt`, then read lines until `accept` returns a value.
    pub fn ask<T>(
        &mut self,
        prompt: &Prompt,
        mut accept: impl FnMut(&str) -> Result<T, Rejection>,
    ) -> Result<T, GameError> {
        self.renderer.prompt(prompt)?;
        loop {
            let line = self.input.read_line()?.ok_or(GameError::InputClosed)?;
            match accept(&line) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    debug!(question = %prompt.question, answer = %line, %rejection, "Answer rejected");
                    self.renderer.reject(&rejection)?;
                }
            }
        }
    }

    pub fn ask_integer<T>(
        &mut self,
        prompt: &Prompt,
        check: impl Fn(i64) -> Result<T, Rejection>,
    ) -> Result<T, GameError> {
        self.ask(prompt, |line| parse_integer(line).and_then(&check))
    }

    /// Menu answered with a letter; `lookup` maps letters to values and the cancel
    /// letter always backs out.
    pub fn ask_choice<T>(
        &mut self,
        prompt: &Prompt,
        lookup: impl Fn(char) -> Option<T>,
        check: impl Fn(T) -> Result<T, Rejection>,
    ) -> Result<Choice<T>, GameError> {
        self.ask(prompt, |line| {
            let letter = parse_letter(line)?;
            if letter == CANCEL_ID {
                return Ok(Choice::Cancel);
            }
            let value = lookup(letter).ok_or(Rejection::UnknownOption)?;
            check(value).map(Choice::Picked)
        })
    }

    fn ask_yes_no(
        &mut self,
        prompt: &Prompt,
        on_yes: impl Fn() -> Result<(), Rejection>,
    ) -> Result<bool, GameError> {
        self.ask(prompt, |line| match parse_letter(line)? {
            YES_ID => on_yes().map(|_| true),
            NO_ID => Ok(false),
            _ => Err(Rejection::UnknownOption),
        })
    }

    pub fn ask_player_id(&mut self) -> Result<u16, GameError> {
        let prompt = Prompt::new("Enter your preferred merchant code (0 - 999)");
        self.ask_integer(&prompt, validation::check_player_id)
    }

    pub fn ask_initial_balance(&mut self) -> Result<i64, GameError> {
        let prompt = Prompt::new("Enter your preferred initial balance (> 0)");
        self.ask_integer(&prompt, validation::check_initial_balance)
    }

    pub fn ask_profit_target(&mut self) -> Result<i64, GameError> {
        let prompt = Prompt::new("Enter your target profit (>= 20)");
        self.ask_integer(&prompt, validation::check_profit_target)
    }

    /// "Are you sure?" before committing a trade or voyage.
    pub fn ask_confirmation(&mut self) -> Result<bool, GameError> {
        let prompt = Prompt::new("Are you sure? [Y / N]");
        self.ask_yes_no(&prompt, || Ok(()))
    }

    /// Wait for any line before leaving a result screen.
    pub fn pause(&mut self) -> Result<(), GameError> {
        let prompt = Prompt::new("Press enter to continue");
        self.ask(&prompt, |_| Ok(()))
    }

    pub fn ask_action(
        &mut self,
        state: &GameState,
        market: &Market,
    ) -> Result<Action, GameError> {
        let mut prompt = Prompt::new("What would you like to do?");
        for action in validation::action_options(state, market) {
            if action != Action::Quit {
                prompt = prompt.option(action.id(), action.label());
            }
        }
        let prompt = prompt.footer(Action::Quit.id(), Action::Quit.label());

        self.ask(&prompt, |line| {
            let action = Action::from_id(parse_letter(line)?).ok_or(Rejection::UnknownOption)?;
            validation::check_action(state, market, action)
        })
    }

    pub fn ask_cargo(
        &mut self,
        kind: TradeKind,
        state: &GameState,
        market: &Market,
    ) -> Result<Choice<Cargo>, GameError> {
        let listed = match kind {
            TradeKind::Buy => validation::buy_options(state, market),
            TradeKind::Sell => validation::sell_options(state),
        };
        let mut prompt = Prompt::new(format!("What would you like to {}?", kind.verb()));
        for cargo in listed {
            prompt = prompt.option(cargo.id(), cargo.name());
        }
        let prompt = prompt.footer(CANCEL_ID, "Return To Main Menu");

        self.ask_choice(&prompt, Cargo::from_id, |cargo| {
            validation::check_cargo_choice(kind, state, market, cargo)
        })
    }

    pub fn ask_amount(
        &mut self,
        kind: TradeKind,
        cargo: Cargo,
        state: &GameState,
        market: &Market,
    ) -> Result<u32, GameError> {
        let prompt = Prompt::new(format!(
            "Enter the amount of cargo you want to {}",
            kind.verb()
        ));
        self.ask_integer(&prompt, |amount| {
            validation::check_amount(kind, state, market, cargo, amount)
        })
    }

    /// Offer the next hull. `None` when the player declines.
    pub fn ask_upgrade(&mut self, state: &GameState) -> Result<Option<Upgrade>, GameError> {
        let mut prompt = Prompt::new("Do you want to upgrade your ship? [Y / N]");
        if let Some(upgrade) = Upgrade::from_tier(state.ship.tier()) {
            prompt = prompt
                .detail(format!("Cost: {}", upgrade.cost()))
                .detail(format!("New Cargo Capacity: {}", upgrade.new_limit()));
        }

        let confirmed = self.ask_yes_no(&prompt, || validation::check_upgrade(state).map(|_| ()))?;
        if !confirmed {
            return Ok(None);
        }
        Ok(validation::check_upgrade(state).ok())
    }

    pub fn ask_destination(&mut self, current: Port) -> Result<Choice<Port>, GameError> {
        let mut prompt = Prompt::new("Where would you like to go?");
        for port in validation::destination_options(current) {
            prompt = prompt.option(port.id(), port.name());
        }
        let prompt = prompt.footer(CANCEL_ID, "Return To Main Menu");

        self.ask_choice(&prompt, Port::from_id, |port| {
            validation::check_destination(current, port)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::{screen::Screen, state::NewGame};

    #[derive(Default)]
    struct Transcript {
        prompts: Vec<Prompt>,
        rejections: Vec<Rejection>,
    }

    impl Renderer for Transcript {
        fn screen(&mut self, _screen: &Screen<'_>) -> io::Result<()> {
            Ok(())
        }

        fn prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
            self.prompts.push(prompt.clone());
            Ok(())
        }

        fn reject(&mut self, rejection: &Rejection) -> io::Result<()> {
            self.rejections.push(rejection.clone());
            Ok(())
        }
    }

    fn prompter(lines: &[&str]) -> Prompter<ScriptedInput, Transcript> {
        Prompter::new(ScriptedInput::new(lines.iter().copied()), Transcript::default())
    }

    fn state(balance: i64) -> GameState {
        GameState::start(NewGame {
            player_id: 1,
            initial_balance: balance,
            profit_target: 20,
        })
        .expect("valid setup")
    }

    #[test]
    fn line_reader_strips_terminators_and_reports_eof() {
        let mut reader = LineReader::new(Cursor::new("42\r\nabc\n"));
        assert_eq!(reader.read_line().unwrap(), Some("42".to_string()));
        assert_eq!(reader.read_line().unwrap(), Some("abc".to_string()));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn letters_must_be_a_single_character() {
        assert_eq!(parse_letter(" b "), Ok('B'));
        assert_eq!(parse_letter("buy"), Err(Rejection::UnknownOption));
        assert_eq!(parse_letter(""), Err(Rejection::UnknownOption));
        assert_eq!(parse_integer(" -3 "), Ok(-3));
        assert_eq!(parse_integer("ten"), Err(Rejection::NotAnInteger));
        assert_eq!(parse_integer("1.5"), Err(Rejection::NotAnInteger));
    }

    #[test]
    fn player_id_retries_until_in_range() {
        let mut prompter = prompter(&["abc", "-1", "1000", "100"]);
        assert_eq!(prompter.ask_player_id().unwrap(), 100);
        assert_eq!(
            prompter.renderer().rejections,
            vec![
                Rejection::NotAnInteger,
                Rejection::PlayerIdOutOfRange,
                Rejection::PlayerIdOutOfRange,
            ]
        );
        assert_eq!(prompter.renderer().prompts.len(), 1);
    }

    #[test]
    fn setup_values_are_validated() {
        let mut prompter = prompter(&["0", "250", "19", "20"]);
        assert_eq!(prompter.ask_initial_balance().unwrap(), 250);
        assert_eq!(prompter.ask_profit_target().unwrap(), 20);
        assert_eq!(
            prompter.renderer().rejections,
            vec![Rejection::NotPositive, Rejection::ProfitTargetTooLow]
        );
    }

    #[test]
    fn exhausted_input_is_reported() {
        let mut prompter = prompter(&["x"]);
        assert!(matches!(
            prompter.ask_confirmation(),
            Err(GameError::InputClosed)
        ));
    }

    #[test]
    fn confirmation_is_case_insensitive() {
        let mut prompter = prompter(&["maybe", "y", "N"]);
        assert!(prompter.ask_confirmation().unwrap());
        assert!(!prompter.ask_confirmation().unwrap());
        assert_eq!(prompter.renderer().rejections, vec![Rejection::UnknownOption]);
    }

    #[test]
    fn action_menu_lists_only_legal_actions() {
        let state = state(100);
        let market = Market::with_prices(Port::Manila, [10, 10, 60, 120]);
        let mut prompter = prompter(&["s", "u", "z", "b"]);
        assert_eq!(prompter.ask_action(&state, &market).unwrap(), Action::Buy);

        let prompt = &prompter.renderer().prompts[0];
        let letters: Vec<char> = prompt.options.iter().map(|option| option.id).collect();
        assert_eq!(letters, vec!['B', 'N']);
        assert_eq!(prompt.footer.as_ref().map(|option| option.id), Some('Q'));
        assert_eq!(
            prompter.renderer().rejections,
            vec![
                Rejection::NothingToSell,
                Rejection::CannotAffordUpgrade,
                Rejection::UnknownOption,
            ]
        );
    }

    #[test]
    fn cargo_menu_can_be_cancelled() {
        let state = state(100);
        let market = Market::with_prices(Port::Manila, [10, 10, 60, 120]);
        let mut prompter = prompter(&["g", "x"]);
        let choice = prompter.ask_cargo(TradeKind::Buy, &state, &market).unwrap();
        assert_eq!(choice, Choice::Cancel);
        assert_eq!(
            prompter.renderer().rejections,
            vec![Rejection::CannotAffordCargo(Cargo::Gun)]
        );
        let prompt = &prompter.renderer().prompts[0];
        assert!(prompt.lists('C'));
        assert!(prompt.lists('S'));
        assert!(!prompt.lists('G'));
    }

    #[test]
    fn amount_retries_name_the_cargo() {
        let state = state(100);
        let market = Market::with_prices(Port::Manila, [10, 10, 60, 120]);
        let mut prompter = prompter(&["0", "11", "10"]);
        let amount = prompter
            .ask_amount(TradeKind::Buy, Cargo::Coconut, &state, &market)
            .unwrap();
        assert_eq!(amount, 10);
        assert_eq!(
            prompter.renderer().rejections[1].to_string(),
            "You do not have enough gold coins to buy 11 coconuts!"
        );
    }

    #[test]
    fn upgrade_yes_without_funds_is_refused() {
        let state = state(999);
        let mut prompter = prompter(&["y", "n"]);
        assert_eq!(prompter.ask_upgrade(&state).unwrap(), None);
        assert_eq!(
            prompter.renderer().rejections,
            vec![Rejection::UpgradeUnaffordable]
        );

        let state = self::state(1_000);
        let mut prompter = self::prompter(&["Y"]);
        let upgrade = prompter.ask_upgrade(&state).unwrap().expect("affordable");
        assert_eq!(upgrade.cost(), 1_000);
        assert_eq!(
            prompter.renderer().prompts[0].details,
            vec!["Cost: 1000".to_string(), "New Cargo Capacity: 150".to_string()]
        );
    }

    #[test]
    fn destination_excludes_current_port() {
        let mut prompter = prompter(&["m", "p"]);
        let choice = prompter.ask_destination(Port::Manila).unwrap();
        assert_eq!(choice, Choice::Picked(Port::Pandakan));
        assert_eq!(
            prompter.renderer().rejections,
            vec![Rejection::AlreadyInPort(Port::Manila)]
        );
        assert!(!prompter.renderer().prompts[0].lists('M'));
    }
}

//! The turn loop.
//!
//! The outer loop rolls one market per turn; the inner loop keeps offering the
//! main menu until the player sails away or quits.

use rand::Rng;
use tracing::{debug, info};

use crate::{
    errors::GameError,
    market::Market,
    models::{Action, TradeKind},
    prompt::{Choice, InputSource, Prompter},
    screen::{GameSummary, Renderer, Screen, TradeReceipt},
    state::{GameState, NewGame},
};

/// What ended a single sub-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Stay,
    Sailed,
    Quit,
}

/// A game being played against some input source and renderer.
#[derive(Debug)]
pub struct GameSession<I, R, G> {
    state: GameState,
    prompter: Prompter<I, R>,
    rng: G,
}

impl<I, R, G> GameSession<I, R, G>
where
    I: InputSource,
    R: Renderer,
    G: Rng,
{
    /// Show the title screen and ask the three setup questions.
    pub fn setup(input: I, renderer: R, rng: G) -> Result<Self, GameError> {
        let mut prompter = Prompter::new(input, renderer);
        prompter.renderer().screen(&Screen::Title)?;

        let player_id = prompter.ask_player_id()?;
        let initial_balance = prompter.ask_initial_balance()?;
        let profit_target = prompter.ask_profit_target()?;
        let setup = NewGame {
            player_id,
            initial_balance,
            profit_target,
        };
        info!(player_id, initial_balance, profit_target, "Game started");

        Ok(Self::resume(GameState::start(setup)?, prompter, rng))
    }

    fn resume(state: GameState, prompter: Prompter<I, R>, rng: G) -> Self {
        Self {
            state,
            prompter,
            rng,
        }
    }

    /// Play until the player quits or runs out of turns, then show the end screen.
    pub fn run(mut self) -> Result<GameSummary, GameError> {
        match self.play() {
            Ok(()) => {}
            Err(GameError::InputClosed) => {
                info!("Input closed; ending the voyage early");
                self.state.quit();
            }
            Err(err) => return Err(err),
        }
        self.finish()
    }

    fn play(&mut self) -> Result<(), GameError> {
        while !self.state.is_game_over() {
            let market = Market::generate(self.state.port, &mut self.rng);
            debug!(port = %market.port(), turn = self.state.player.turns, ?market, "Market rolled");

            loop {
                match self.sub_turn(&market)? {
                    Step::Stay => continue,
                    Step::Sailed => break,
                    Step::Quit => {
                        self.state.quit();
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn sub_turn(&mut self, market: &Market) -> Result<Step, GameError> {
        self.show_main(market)?;
        let action = self.prompter.ask_action(&self.state, market)?;
        if action != Action::Quit {
            self.show_main(market)?;
        }

        match action {
            Action::Buy => self.trade(TradeKind::Buy, market),
            Action::Sell => self.trade(TradeKind::Sell, market),
            Action::Upgrade => self.upgrade(),
            Action::Navigate => self.navigate(),
            Action::Quit => {
                info!(turns = self.state.player.turns, "Player quit");
                Ok(Step::Quit)
            }
        }
    }

    fn show_main(&mut self, market: &Market) -> Result<(), GameError> {
        let screen = Screen::Main {
            state: &self.state,
            market,
        };
        self.prompter.renderer().screen(&screen)?;
        Ok(())
    }

    fn trade(&mut self, kind: TradeKind, market: &Market) -> Result<Step, GameError> {
        let cargo = match self.prompter.ask_cargo(kind, &self.state, market)? {
            Choice::Picked(cargo) => cargo,
            Choice::Cancel => return Ok(Step::Stay),
        };
        let amount = self.prompter.ask_amount(kind, cargo, &self.state, market)?;
        if !self.prompter.ask_confirmation()? {
            return Ok(Step::Stay);
        }

        let price = market.price(cargo);
        self.state.apply_trade(kind, cargo, amount, price);
        let receipt = TradeReceipt {
            kind,
            cargo,
            amount,
            price,
        };
        self.prompter.renderer().screen(&Screen::Transaction(receipt))?;
        self.prompter.pause()?;
        Ok(Step::Stay)
    }

    fn upgrade(&mut self) -> Result<Step, GameError> {
        if let Some(upgrade) = self.prompter.ask_upgrade(&self.state)? {
            self.state.apply_upgrade(upgrade);
            self.prompter.renderer().screen(&Screen::Upgrade(upgrade))?;
            self.prompter.pause()?;
        }
        Ok(Step::Stay)
    }

    fn navigate(&mut self) -> Result<Step, GameError> {
        let destination = match self.prompter.ask_destination(self.state.port)? {
            Choice::Picked(port) => port,
            Choice::Cancel => return Ok(Step::Stay),
        };
        if !self.prompter.ask_confirmation()? {
            return Ok(Step::Stay);
        }

        let day = self.state.player.turns;
        self.state.navigate(destination)?;
        let screen = Screen::Navigation { destination, day };
        self.prompter.renderer().screen(&screen)?;
        self.prompter.pause()?;
        Ok(Step::Sailed)
    }

    fn finish(mut self) -> Result<GameSummary, GameError> {
        let summary = GameSummary::from_state(&self.state);
        info!(
            profit = summary.profit,
            target = summary.profit_target,
            balance = summary.balance,
            turns = summary.turns,
            met_target = summary.met_target(),
            "Game over"
        );
        self.prompter.renderer().screen(&Screen::End(&summary))?;
        Ok(summary)
    }
}

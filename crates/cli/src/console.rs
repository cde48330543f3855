//! Plain-terminal renderer: banners, stat tables and prompts written line by line.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use tides_core::{
    models::{Cargo, Port, TradeKind, Upgrade},
    screen::{GameSummary, Prompt, PromptOption, Renderer, Screen, TradeReceipt},
    state::{GameState, MAX_TURNS},
    Market, Rejection,
};

use crate::block_font;

/// Columns the layout is centred in.
const SCREEN_WIDTH: usize = 80;
const TABLE_INDENT: usize = 3;
const TABLE_GAP: usize = 4;
const TABLE_INNER: usize = 32;

const LICENSE_NOTICE: [&str; 3] = [
    "Tides of Manila: A Merchant's Quest  Copyright (C) 2024  Louis Raphael V. Panaligan",
    "This program comes with ABSOLUTELY NO WARRANTY.",
    "This is free software, and you are welcome to redistribute it under certain conditions.",
];

#[derive(Debug, Clone, Copy)]
struct Theme {
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

/// Renders game screens to any writer, usually locked stdout.
pub struct ConsoleRenderer<W> {
    out: W,
    theme: Theme,
    color: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            theme: Theme::default(),
            color,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print('\n'))
    }

    fn painted(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            queue!(self.out, Print(text))
        }
    }

    fn painted_line(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.painted(color, text)?;
        queue!(self.out, Print('\n'))
    }

    fn blank(&mut self, count: usize) -> io::Result<()> {
        queue!(self.out, Print("\n".repeat(count)))
    }

    fn separator(&mut self) -> io::Result<()> {
        self.blank(2)?;
        let rule = "━".repeat(SCREEN_WIDTH);
        self.painted_line(self.theme.muted, &rule)?;
        self.blank(2)
    }

    fn banner(&mut self, text: &str, color: Color) -> io::Result<()> {
        let rows = block_font::render(text);
        let pad = " ".repeat(left_pad(block_font::width(&rows)));
        for row in rows {
            self.painted_line(color, &format!("{pad}{row}"))?;
        }
        self.blank(1)
    }

    fn centered(&mut self, color: Option<Color>, text: &str) -> io::Result<()> {
        let text = format!("{}{text}", " ".repeat(left_pad(text.chars().count())));
        match color {
            Some(color) => self.painted_line(color, &text),
            None => self.line(&text),
        }
    }

    fn title(&mut self) -> io::Result<()> {
        for line in LICENSE_NOTICE {
            self.line(line)?;
        }
        self.separator()?;
        self.banner("Tides of Manila", self.theme.accent)?;
        self.centered(Some(self.theme.muted), "A Merchant's Quest")?;
        self.blank(2)
    }

    fn main_screen(&mut self, state: &GameState, market: &Market) -> io::Result<()> {
        self.separator()?;
        self.banner(state.port.name(), self.theme.accent)?;

        let player = &state.player;
        let indent = " ".repeat(TABLE_INDENT);
        self.line(&format!("{indent}• Merchant ID: {:>3}", player.id))?;
        self.line(&format!("{indent}• Balance: {} Gold Coins", player.balance))?;
        queue!(self.out, Print(format!("{indent}• Profit: ")))?;
        let profit_color = if state.met_target() {
            self.theme.success
        } else {
            self.theme.danger
        };
        self.painted_line(profit_color, &format!("{}%", state.profit()))?;
        self.line(&format!("{indent}• Target Profit: {}%", player.profit_target))?;
        self.line(&format!(
            "{indent}• Ship: Tier {} ({} cargo spaces)",
            state.ship.tier().level(),
            state.ship.cargo_limit()
        ))?;
        self.blank(1)?;

        let hold = cargo_table(
            "Total Cargo",
            &format!("{:>3} of {:>3}", state.ship.total(), state.ship.cargo_limit()),
            |cargo| state.ship.amount(cargo),
        );
        let prices = cargo_table(
            "Market Prices",
            &format!("Day {:>2} of {}", player.turns, MAX_TURNS - 1),
            |cargo| market.price(cargo),
        );
        let gap = " ".repeat(TABLE_GAP);
        for (left, right) in hold.iter().zip(&prices) {
            self.line(&format!("{indent}{left}{gap}{right}"))?;
        }
        self.blank(2)
    }

    fn transaction(&mut self, receipt: &TradeReceipt) -> io::Result<()> {
        self.separator()?;
        let plural = receipt.cargo.plural();
        let total = receipt.total();
        match receipt.kind {
            TradeKind::Buy => {
                self.banner("Bought", self.theme.success)?;
                let added = format!(
                    "• You added {} {plural} to the ship's storage!",
                    receipt.amount
                );
                self.centered(Some(self.theme.success), &added)?;
                self.centered(Some(self.theme.danger), &format!("• You spent {total} gold coins!"))?;
            }
            TradeKind::Sell => {
                self.banner("Sold", self.theme.success)?;
                let removed = format!(
                    "• You removed {} {plural} from the ship's storage!",
                    receipt.amount
                );
                self.centered(Some(self.theme.danger), &removed)?;
                self.centered(Some(self.theme.success), &format!("• You earned {total} gold coins!"))?;
            }
        }
        self.blank(2)
    }

    fn upgrade(&mut self, upgrade: &Upgrade) -> io::Result<()> {
        self.separator()?;
        self.banner("Upgraded", self.theme.success)?;
        let gained = format!(
            "• You gained {} additional cargo spaces!",
            upgrade.capacity_gain()
        );
        self.centered(Some(self.theme.success), &gained)?;
        let spent = format!("• You spent {} gold coins!", upgrade.cost());
        self.centered(Some(self.theme.danger), &spent)?;
        self.blank(2)
    }

    fn navigation(&mut self, destination: Port, day: u32) -> io::Result<()> {
        self.separator()?;
        self.banner("Set Sail", self.theme.success)?;
        let arrived = format!("You have navigated to the port of {}!", destination.name());
        self.centered(None, &arrived)?;
        self.blank(1)?;
        self.centered(None, &format!("Day {day:>2} → Day {:>2}", day + 1))?;
        self.blank(2)
    }

    fn end(&mut self, summary: &GameSummary) -> io::Result<()> {
        self.separator()?;
        let (heading, color) = if summary.met_target() {
            ("You Win!", self.theme.warning)
        } else {
            ("Game Over", self.theme.danger)
        };
        self.banner(heading, color)?;

        let profit_color = if summary.met_target() {
            self.theme.success
        } else {
            self.theme.danger
        };
        let profit = format!(
            "• Final profit made: {}% ({} gold coins)",
            summary.profit,
            summary.gain()
        );
        self.centered(Some(profit_color), &profit)?;
        self.centered(None, &format!("• Final balance: {} gold coins", summary.balance))?;
        self.centered(
            None,
            &format!("• Number of turns (days) exhausted: {}", summary.turns),
        )?;
        if summary.quit {
            self.centered(Some(self.theme.muted), "The voyage was cut short.")?;
        }
        self.blank(2)
    }

    fn option_line(&mut self, pad: &str, option: &PromptOption) -> io::Result<()> {
        queue!(self.out, Print(format!("{pad}‣ ")))?;
        self.painted(self.theme.accent, &format!("[{}]", option.id))?;
        self.line(&format!(" {}", option.label))
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn screen(&mut self, screen: &Screen<'_>) -> io::Result<()> {
        match screen {
            Screen::Title => self.title()?,
            Screen::Main { state, market } => self.main_screen(state, market)?,
            Screen::Transaction(receipt) => self.transaction(receipt)?,
            Screen::Upgrade(upgrade) => self.upgrade(upgrade)?,
            Screen::Navigation { destination, day } => self.navigation(*destination, *day)?,
            Screen::End(summary) => self.end(summary)?,
        }
        self.out.flush()
    }

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
        let pad = " ".repeat(left_pad(prompt.question.chars().count()));
        self.line(&format!("{pad}{}", prompt.question))?;
        for detail in &prompt.details {
            self.line(&format!("{pad}• {detail}"))?;
        }
        if !prompt.options.is_empty() {
            self.blank(1)?;
        }
        for option in &prompt.options {
            self.option_line(&pad, option)?;
        }
        if let Some(footer) = &prompt.footer {
            self.blank(1)?;
            self.option_line(&pad, footer)?;
        }
        queue!(self.out, Print(format!("\n{pad}% ")))?;
        self.out.flush()
    }

    fn reject(&mut self, rejection: &Rejection) -> io::Result<()> {
        self.centered(Some(self.theme.danger), &rejection.to_string())?;
        queue!(self.out, Print("% "))?;
        self.out.flush()
    }
}

fn left_pad(width: usize) -> usize {
    SCREEN_WIDTH.saturating_sub(width) / 2
}

/// Boxed two-by-two cargo table with a title row.
fn cargo_table(title: &str, info: &str, value: impl Fn(Cargo) -> u32) -> Vec<String> {
    let border = "═".repeat(TABLE_INNER);
    let row = |left: Cargo, right: Cargo| {
        format!(
            "║ {:<8}{:>5}  │  {:<6}{:>5}  ║",
            left.name(),
            value(left),
            right.name(),
            value(right)
        )
    };
    vec![
        format!("╔{border}╗"),
        format!("║ {title:<15}{info:>15} ║"),
        format!("╟{}╢", "─".repeat(TABLE_INNER)),
        row(Cargo::Coconut, Cargo::Silk),
        row(Cargo::Rice, Cargo::Gun),
        format!("╚{border}╝"),
    ]
}

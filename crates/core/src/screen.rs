#![allow(missing_docs)]

//! What the session asks a front-end to display.
//!
//! The core never formats text for the terminal itself; it hands a [`Screen`],
//! [`Prompt`] or [`Rejection`] to a [`Renderer`] and moves on.

use std::io;

use crate::{
    market::Market,
    models::{Cargo, Port, TradeKind, Upgrade},
    state::GameState,
    validation::Rejection,
};

/// A completed cargo trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeReceipt {
    pub kind: TradeKind,
    pub cargo: Cargo,
    pub amount: u32,
    pub price: u32,
}

impl TradeReceipt {
    /// Gold coins spent or earned.
    pub fn total(&self) -> i64 {
        crate::state::trade_value(self.amount, self.price)
    }
}

/// Final numbers shown once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub player_id: u16,
    pub profit: i64,
    pub profit_target: i64,
    pub balance: i64,
    pub initial_balance: i64,
    pub turns: u32,
    pub quit: bool,
}

impl GameSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            player_id: state.player.id,
            profit: state.profit(),
            profit_target: state.player.profit_target,
            balance: state.player.balance,
            initial_balance: state.player.initial_balance,
            turns: state.player.turns,
            quit: state.has_quit(),
        }
    }

    pub fn met_target(&self) -> bool {
        self.profit >= self.profit_target
    }

    /// Gold coins gained over the whole game.
    pub fn gain(&self) -> i64 {
        self.balance - self.initial_balance
    }
}

/// Full screens drawn between prompts.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Title,
    Main {
        state: &'a GameState,
        market: &'a Market,
    },
    Transaction(TradeReceipt),
    Upgrade(Upgrade),
    Navigation {
        destination: Port,
        /// Turns spent before this voyage.
        day: u32,
    },
    End(&'a GameSummary),
}

/// One selectable line of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    pub id: char,
    pub label: String,
}

/// A question together with its listed answers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prompt {
    pub question: String,
    /// Informational bullet lines shown under the question.
    pub details: Vec<String>,
    pub options: Vec<PromptOption>,
    /// Trailing option separated from the rest, such as cancel or quit.
    pub footer: Option<PromptOption>,
}

impl Prompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn option(mut self, id: char, label: impl Into<String>) -> Self {
        self.options.push(PromptOption {
            id,
            label: label.into(),
        });
        self
    }

    pub fn footer(mut self, id: char, label: impl Into<String>) -> Self {
        self.footer = Some(PromptOption {
            id,
            label: label.into(),
        });
        self
    }

    /// Whether `id` is one of the listed letters.
    pub fn lists(&self, id: char) -> bool {
        self.options
            .iter()
            .chain(self.footer.iter())
            .any(|option| option.id == id)
    }
}

/// Display capability the session depends on.
pub trait Renderer {
    fn screen(&mut self, screen: &Screen<'_>) -> io::Result<()>;

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<()>;

    /// Explain why the previous answer was refused.
    fn reject(&mut self, rejection: &Rejection) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn screen(&mut self, screen: &Screen<'_>) -> io::Result<()> {
        (**self).screen(screen)
    }

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
        (**self).prompt(prompt)
    }

    fn reject(&mut self, rejection: &Rejection) -> io::Result<()> {
        (**self).reject(rejection)
    }
}

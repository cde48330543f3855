#![allow(missing_docs)]

//! Authoritative game state and the transitions applied to it.
//!
//! Every mutation here assumes the caller already ran the matching check from
//! [`crate::validation`]; the invariants are only asserted in debug builds.

use tracing::info;

use crate::{
    errors::GameError,
    models::{Cargo, Port, Tier, TradeKind, Upgrade},
    validation,
};

/// Number of successful voyages after which the game ends.
pub const MAX_TURNS: u32 = 30;

/// The merchant and their purse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u16,
    pub balance: i64,
    pub initial_balance: i64,
    /// Percentage the player aims to reach.
    pub profit_target: i64,
    pub turns: u32,
}

/// Ship capacity and what is stowed aboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    tier: Tier,
    cargo: [u32; 4],
}

impl Ship {
    fn new() -> Self {
        Self {
            tier: Tier::One,
            cargo: [0; 4],
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn cargo_limit(&self) -> u32 {
        self.tier.cargo_limit()
    }

    /// Units of `cargo` aboard.
    pub fn amount(&self, cargo: Cargo) -> u32 {
        self.cargo[cargo.index()]
    }

    /// Units of all cargo aboard.
    pub fn total(&self) -> u32 {
        self.cargo.iter().sum()
    }

    /// Free cargo slots.
    pub fn headroom(&self) -> u32 {
        self.cargo_limit().saturating_sub(self.total())
    }
}

/// Everything that changes while a game is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    pub ship: Ship,
    pub port: Port,
    quit: bool,
}

/// Values the player picked during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGame {
    pub player_id: u16,
    pub initial_balance: i64,
    pub profit_target: i64,
}

impl GameState {
    /// Start a fresh game docked at Manila with an empty tier one ship.
    pub fn start(setup: NewGame) -> Result<Self, GameError> {
        validation::check_player_id(i64::from(setup.player_id))?;
        validation::check_initial_balance(setup.initial_balance)?;
        validation::check_profit_target(setup.profit_target)?;

        Ok(Self {
            player: Player {
                id: setup.player_id,
                balance: setup.initial_balance,
                initial_balance: setup.initial_balance,
                profit_target: setup.profit_target,
                turns: 0,
            },
            ship: Ship::new(),
            port: Port::START,
            quit: false,
        })
    }

    /// Move `amount` units of `cargo` at `price` each between the market and the hold.
    pub fn apply_trade(&mut self, kind: TradeKind, cargo: Cargo, amount: u32, price: u32) {
        let value = trade_value(amount, price);
        let slot = &mut self.ship.cargo[cargo.index()];
        match kind {
            TradeKind::Buy => {
                debug_assert!(self.player.balance >= value, "buy exceeds balance");
                self.player.balance -= value;
                *slot += amount;
            }
            TradeKind::Sell => {
                debug_assert!(*slot >= amount, "sell exceeds cargo aboard");
                self.player.balance += value;
                *slot -= amount;
            }
        }
        debug_assert!(self.ship.total() <= self.ship.cargo_limit());

        info!(
            kind = kind.verb(),
            cargo = cargo.name(),
            amount,
            price,
            balance = self.player.balance,
            "Trade applied"
        );
    }

    /// Pay for `upgrade` and swap to the larger hull.
    pub fn apply_upgrade(&mut self, upgrade: Upgrade) {
        debug_assert_eq!(upgrade.from, self.ship.tier, "upgrade skips a tier");
        self.player.balance -= upgrade.cost();
        self.ship.tier = upgrade.to;

        info!(
            tier = upgrade.to.level(),
            cargo_limit = upgrade.new_limit(),
            cost = upgrade.cost(),
            "Ship upgraded"
        );
    }

    /// Sail to `destination`, spending one turn.
    pub fn navigate(&mut self, destination: Port) -> Result<(), GameError> {
        if destination == self.port {
            return Err(GameError::AlreadyDocked(destination));
        }
        let from = self.port;
        self.port = destination;
        self.player.turns += 1;

        info!(from = %from, to = %destination, turns = self.player.turns, "Navigated");
        Ok(())
    }

    /// Voluntarily end the game.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Profit shown to the player.
    ///
    /// Scales the raw gain by the profit target and truncates toward zero, so it is
    /// not a percentage of the initial balance.
    pub fn profit(&self) -> i64 {
        let scaled = i128::from(self.player.profit_target) * i128::from(self.gain()) / 100;
        i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
    }

    /// Gold gained (or lost) since the start.
    pub fn gain(&self) -> i64 {
        self.player.balance - self.player.initial_balance
    }

    pub fn met_target(&self) -> bool {
        self.profit() >= self.player.profit_target
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn out_of_turns(&self) -> bool {
        self.player.turns >= MAX_TURNS
    }

    pub fn is_game_over(&self) -> bool {
        self.quit || self.out_of_turns()
    }
}

/// Total gold moved by trading `amount` units at `price`.
pub fn trade_value(amount: u32, price: u32) -> i64 {
    i64::from(amount) * i64::from(price)
}

#![allow(missing_docs)]

//! Shared domain models.
//!
//! Every closed set the player picks from (ports, cargo, actions) is an enum here.
//! The single-letter ids shown in prompts only exist at the parsing boundary via
//! [`Port::id`]/[`Port::from_id`] and friends.

use std::fmt;

/// Letter used by every choice prompt to return to the main menu.
pub const CANCEL_ID: char = 'X';
/// Letter confirming a yes/no prompt.
pub const YES_ID: char = 'Y';
/// Letter declining a yes/no prompt.
pub const NO_ID: char = 'N';

/// One of the four fixed ports the ship can dock at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Tondo,
    Manila,
    Pandakan,
    Sapa,
}

impl Port {
    /// All ports in menu order.
    pub const ALL: [Port; 4] = [Port::Tondo, Port::Manila, Port::Pandakan, Port::Sapa];

    /// Port every new game starts in.
    pub const START: Port = Port::Manila;

    /// Letter typed to pick this port.
    pub fn id(self) -> char {
        match self {
            Port::Tondo => 'T',
            Port::Manila => 'M',
            Port::Pandakan => 'P',
            Port::Sapa => 'S',
        }
    }

    /// Case-insensitive lookup of a port letter.
    pub fn from_id(id: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|port| port.id() == id.to_ascii_uppercase())
    }

    pub fn name(self) -> &'static str {
        match self {
            Port::Tondo => "Tondo",
            Port::Manila => "Manila",
            Port::Pandakan => "Pandakan",
            Port::Sapa => "Sapa",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tradeable goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cargo {
    Coconut,
    Rice,
    Silk,
    Gun,
}

impl Cargo {
    /// All cargo types in menu order.
    pub const ALL: [Cargo; 4] = [Cargo::Coconut, Cargo::Rice, Cargo::Silk, Cargo::Gun];

    /// Letter typed to pick this cargo.
    pub fn id(self) -> char {
        match self {
            Cargo::Coconut => 'C',
            Cargo::Rice => 'R',
            Cargo::Silk => 'S',
            Cargo::Gun => 'G',
        }
    }

    /// Case-insensitive lookup of a cargo letter.
    pub fn from_id(id: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cargo| cargo.id() == id.to_ascii_uppercase())
    }

    pub fn name(self) -> &'static str {
        match self {
            Cargo::Coconut => "Coconut",
            Cargo::Rice => "Rice",
            Cargo::Silk => "Silk",
            Cargo::Gun => "Gun",
        }
    }

    /// Noun for a single unit, with article where English wants one ("a coconut", "rice").
    pub fn single(self) -> &'static str {
        match self {
            Cargo::Coconut => "a coconut",
            Cargo::Rice => "rice",
            Cargo::Silk => "silk",
            Cargo::Gun => "a gun",
        }
    }

    /// Noun used after a quantity ("10 coconuts", "10 rice").
    pub fn plural(self) -> &'static str {
        match self {
            Cargo::Coconut => "coconuts",
            Cargo::Rice => "rice",
            Cargo::Silk => "silk",
            Cargo::Gun => "guns",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Main menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Buy,
    Sell,
    Upgrade,
    Navigate,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Buy,
        Action::Sell,
        Action::Upgrade,
        Action::Navigate,
        Action::Quit,
    ];

    pub fn id(self) -> char {
        match self {
            Action::Buy => 'B',
            Action::Sell => 'S',
            Action::Upgrade => 'U',
            Action::Navigate => 'N',
            Action::Quit => 'Q',
        }
    }

    pub fn from_id(id: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.id() == id.to_ascii_uppercase())
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Buy => "Buy Cargo",
            Action::Sell => "Sell Cargo",
            Action::Upgrade => "Upgrade Ship",
            Action::Navigate => "Navigate To a Different Port",
            Action::Quit => "Quit Game",
        }
    }
}

/// Direction of a cargo trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn verb(self) -> &'static str {
        match self {
            TradeKind::Buy => "buy",
            TradeKind::Sell => "sell",
        }
    }
}

/// Ship capacity level. Upgrades only ever move one tier up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    One,
    Two,
    Three,
    Four,
}

impl Tier {
    pub const MAX: Tier = Tier::Four;

    /// Maximum total cargo units a ship of this tier can carry.
    pub fn cargo_limit(self) -> u32 {
        match self {
            Tier::One => 75,
            Tier::Two => 150,
            Tier::Three => 225,
            Tier::Four => 300,
        }
    }

    /// Gold coins paid to upgrade into this tier. Tier one is the starting ship.
    pub fn upgrade_cost(self) -> i64 {
        match self {
            Tier::One => 0,
            Tier::Two => 1_000,
            Tier::Three => 2_500,
            Tier::Four => 5_000,
        }
    }

    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::One => Some(Tier::Two),
            Tier::Two => Some(Tier::Three),
            Tier::Three => Some(Tier::Four),
            Tier::Four => None,
        }
    }

    /// 1-based tier number.
    pub fn level(self) -> u8 {
        self as u8 + 1
    }
}

/// A purchasable step from the current tier to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrade {
    pub from: Tier,
    pub to: Tier,
}

impl Upgrade {
    /// Upgrade available from `tier`, if it is not already the largest ship.
    pub fn from_tier(tier: Tier) -> Option<Self> {
        tier.next().map(|to| Self { from: tier, to })
    }

    pub fn cost(&self) -> i64 {
        self.to.upgrade_cost()
    }

    pub fn new_limit(&self) -> u32 {
        self.to.cargo_limit()
    }

    /// Extra cargo slots gained.
    pub fn capacity_gain(&self) -> u32 {
        self.to.cargo_limit() - self.from.cargo_limit()
    }
}

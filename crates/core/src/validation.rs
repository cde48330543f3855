#![allow(missing_docs)]

//! Pure predicates gating every player decision.
//!
//! Nothing here mutates state. Each `check_*` function either returns the accepted
//! value or a [`Rejection`] whose `Display` text is shown before the prompt repeats.
//! The `*_options` functions list what a prompt should offer.

use thiserror::Error;

use crate::{
    market::Market,
    models::{Action, Cargo, Port, TradeKind, Upgrade},
    state::{trade_value, GameState},
};

/// Inclusive bounds of a merchant id.
pub const PLAYER_ID_RANGE: (i64, i64) = (0, 999);
/// Smallest starting purse.
pub const MINIMUM_INITIAL_BALANCE: i64 = 1;
/// Smallest accepted profit target.
pub const MINIMUM_PROFIT_TARGET: i64 = 20;
/// Largest starting purse or profit target; keeps profit arithmetic in range.
pub const MAXIMUM_SETUP_VALUE: i64 = i32::MAX as i64;

/// Why an answer was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The line did not parse as an integer.
    #[error("Please only enter an integer!")]
    NotAnInteger,

    /// The line was not a single listed character.
    #[error("Please only enter one of the provided character options!")]
    UnknownOption,

    #[error("Please only enter an integer within the range of 0 - 999!")]
    PlayerIdOutOfRange,

    #[error("Please only enter an integer greater than 0!")]
    NotPositive,

    #[error("Please only enter an integer greater than or equal to 20!")]
    ProfitTargetTooLow,

    #[error("Please only enter an integer less than or equal to {}!", MAXIMUM_SETUP_VALUE)]
    TooLarge,

    #[error("You do not have enough storage to buy more cargo!")]
    HoldFull,

    #[error("You can't afford to buy any cargo!")]
    CannotAffordAnyCargo,

    #[error("You have no cargo to sell!")]
    NothingToSell,

    #[error("Your ship is already in the highest tier!")]
    HighestTier,

    #[error("You can't afford to upgrade your ship!")]
    CannotAffordUpgrade,

    #[error("You do not have enough gold coins to buy {}!", .0.single())]
    CannotAffordCargo(Cargo),

    #[error("You do not have any {} to sell!", .0.plural())]
    NoCargoToSell(Cargo),

    #[error("Your ship can only carry {} cargo!", .limit)]
    ExceedsCargoLimit { limit: u32 },

    #[error("You do not have enough gold coins to buy {} {}!", .amount, .cargo.plural())]
    CannotAffordAmount { cargo: Cargo, amount: u32 },

    #[error("You do not have enough storage to carry {} {}!", .amount, .cargo.plural())]
    NotEnoughStorage { cargo: Cargo, amount: u32 },

    #[error("You do not have {} {} to sell!", .amount, .cargo.plural())]
    NotEnoughCargo { cargo: Cargo, amount: u32 },

    #[error("You do not have enough gold coins to upgrade your ship!")]
    UpgradeUnaffordable,

    #[error("You are already in the port of {0}!")]
    AlreadyInPort(Port),
}

pub fn check_player_id(value: i64) -> Result<u16, Rejection> {
    let (min, max) = PLAYER_ID_RANGE;
    if !(min..=max).contains(&value) {
        return Err(Rejection::PlayerIdOutOfRange);
    }
    u16::try_from(value).map_err(|_| Rejection::PlayerIdOutOfRange)
}

pub fn check_initial_balance(value: i64) -> Result<i64, Rejection> {
    if value < MINIMUM_INITIAL_BALANCE {
        return Err(Rejection::NotPositive);
    }
    if value > MAXIMUM_SETUP_VALUE {
        return Err(Rejection::TooLarge);
    }
    Ok(value)
}

pub fn check_profit_target(value: i64) -> Result<i64, Rejection> {
    if value < MINIMUM_PROFIT_TARGET {
        return Err(Rejection::ProfitTargetTooLow);
    }
    if value > MAXIMUM_SETUP_VALUE {
        return Err(Rejection::TooLarge);
    }
    Ok(value)
}

/// Whether the buy menu would list `cargo`.
///
/// Uses a strict comparison, while [`check_cargo_choice`] only refuses when the
/// balance is below the price. A balance equal to the price is therefore accepted
/// without being listed.
pub fn is_buy_listed(state: &GameState, market: &Market, cargo: Cargo) -> bool {
    state.player.balance > i64::from(market.price(cargo))
}

/// Cargo types the buy menu lists.
pub fn buy_options(state: &GameState, market: &Market) -> Vec<Cargo> {
    Cargo::ALL
        .into_iter()
        .filter(|cargo| is_buy_listed(state, market, *cargo))
        .collect()
}

/// Cargo types the sell menu lists.
pub fn sell_options(state: &GameState) -> Vec<Cargo> {
    Cargo::ALL
        .into_iter()
        .filter(|cargo| state.ship.amount(*cargo) > 0)
        .collect()
}

/// Actions the main menu lists, in menu order.
pub fn action_options(state: &GameState, market: &Market) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| check_action(state, market, *action).is_ok())
        .collect()
}

pub fn check_action(
    state: &GameState,
    market: &Market,
    action: Action,
) -> Result<Action, Rejection> {
    match action {
        Action::Buy => {
            if state.ship.headroom() == 0 {
                return Err(Rejection::HoldFull);
            }
            if buy_options(state, market).is_empty() {
                return Err(Rejection::CannotAffordAnyCargo);
            }
        }
        Action::Sell => {
            if state.ship.total() == 0 {
                return Err(Rejection::NothingToSell);
            }
        }
        Action::Upgrade => {
            let upgrade = Upgrade::from_tier(state.ship.tier()).ok_or(Rejection::HighestTier)?;
            if state.player.balance < upgrade.cost() {
                return Err(Rejection::CannotAffordUpgrade);
            }
        }
        Action::Navigate | Action::Quit => {}
    }
    Ok(action)
}

pub fn check_cargo_choice(
    kind: TradeKind,
    state: &GameState,
    market: &Market,
    cargo: Cargo,
) -> Result<Cargo, Rejection> {
    match kind {
        TradeKind::Buy if state.player.balance < i64::from(market.price(cargo)) => {
            Err(Rejection::CannotAffordCargo(cargo))
        }
        TradeKind::Sell if state.ship.amount(cargo) == 0 => Err(Rejection::NoCargoToSell(cargo)),
        _ => Ok(cargo),
    }
}

pub fn check_amount(
    kind: TradeKind,
    state: &GameState,
    market: &Market,
    cargo: Cargo,
    amount: i64,
) -> Result<u32, Rejection> {
    if amount < 1 {
        return Err(Rejection::NotPositive);
    }
    let limit = state.ship.cargo_limit();
    let amount = match u32::try_from(amount) {
        Ok(amount) if amount <= limit => amount,
        _ => return Err(Rejection::ExceedsCargoLimit { limit }),
    };

    match kind {
        TradeKind::Buy => {
            if state.player.balance < trade_value(amount, market.price(cargo)) {
                return Err(Rejection::CannotAffordAmount { cargo, amount });
            }
            if amount > state.ship.headroom() {
                return Err(Rejection::NotEnoughStorage { cargo, amount });
            }
        }
        TradeKind::Sell => {
            if state.ship.amount(cargo) < amount {
                return Err(Rejection::NotEnoughCargo { cargo, amount });
            }
        }
    }
    Ok(amount)
}

/// Validate a "yes" to the upgrade prompt, returning the step that would be bought.
pub fn check_upgrade(state: &GameState) -> Result<Upgrade, Rejection> {
    let upgrade = Upgrade::from_tier(state.ship.tier()).ok_or(Rejection::HighestTier)?;
    if state.player.balance < upgrade.cost() {
        return Err(Rejection::UpgradeUnaffordable);
    }
    Ok(upgrade)
}

/// Ports the navigation menu lists.
pub fn destination_options(current: Port) -> Vec<Port> {
    Port::ALL
        .into_iter()
        .filter(|port| *port != current)
        .collect()
}

pub fn check_destination(current: Port, destination: Port) -> Result<Port, Rejection> {
    if destination == current {
        return Err(Rejection::AlreadyInPort(destination));
    }
    Ok(destination)
}

//! Property-based tests for trading rules.
//!
//! Run with: cargo test --release --test properties

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use tides_core::{
    market::{price_range, Market},
    models::{Cargo, Port, TradeKind},
    state::{GameState, NewGame},
    validation,
};

fn port_strategy() -> impl Strategy<Value = Port> {
    prop::sample::select(Port::ALL.to_vec())
}

fn cargo_strategy() -> impl Strategy<Value = Cargo> {
    prop::sample::select(Cargo::ALL.to_vec())
}

fn fresh_state(balance: i64) -> GameState {
    GameState::start(NewGame {
        player_id: 1,
        initial_balance: balance,
        profit_target: 20,
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Generated prices always fall inside the port's table.
    #[test]
    fn prop_market_prices_in_range(port in port_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let market = Market::generate(port, &mut rng);
        for (cargo, price) in market.prices() {
            prop_assert!(price_range(port, cargo).contains(price));
        }
    }

    /// Buying then selling the same amount at the same price restores the purse.
    #[test]
    fn prop_round_trip_restores_balance(
        balance in 1i64..1_000_000,
        cargo in cargo_strategy(),
        seed in any::<u64>(),
        amount in 1i64..=75,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let market = Market::generate(Port::Manila, &mut rng);
        let mut state = fresh_state(balance);

        let accepted = validation::check_amount(TradeKind::Buy, &state, &market, cargo, amount);
        prop_assume!(accepted.is_ok());
        let amount = accepted.unwrap();
        let price = market.price(cargo);

        state.apply_trade(TradeKind::Buy, cargo, amount, price);
        prop_assert!(state.player.balance >= 0);
        prop_assert_eq!(state.ship.amount(cargo), amount);

        let sell = validation::check_amount(TradeKind::Sell, &state, &market, cargo, i64::from(amount));
        prop_assert_eq!(sell, Ok(amount));
        state.apply_trade(TradeKind::Sell, cargo, amount, price);
        prop_assert_eq!(state.player.balance, balance);
        prop_assert_eq!(state.ship.total(), 0);
    }

    /// An accepted buy never overdraws or overfills the hold.
    #[test]
    fn prop_accepted_buy_respects_limits(
        balance in 1i64..50_000,
        cargo in cargo_strategy(),
        port in port_strategy(),
        seed in any::<u64>(),
        amount in -10i64..400,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let market = Market::generate(port, &mut rng);
        let state = fresh_state(balance);

        if let Ok(amount) = validation::check_amount(TradeKind::Buy, &state, &market, cargo, amount) {
            let cost = i64::from(amount) * i64::from(market.price(cargo));
            prop_assert!(amount >= 1);
            prop_assert!(cost <= balance);
            prop_assert!(amount <= state.ship.headroom());
        }
    }

    /// Profit tracks the balance change scaled by the target.
    #[test]
    fn prop_profit_sign_follows_gain(
        balance in 1i64..100_000,
        target in 20i64..500,
        delta in -100_000i64..100_000,
    ) {
        let mut state = GameState::start(NewGame {
            player_id: 0,
            initial_balance: balance,
            profit_target: target,
        })
        .unwrap();
        state.player.balance = balance + delta;

        let profit = state.profit();
        prop_assert_eq!(profit, target * delta / 100);
        prop_assert_eq!(profit.signum() != 0, (target * delta).abs() >= 100);
    }
}

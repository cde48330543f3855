//! Per-port price table and the per-turn market snapshot.

use rand::Rng;

use crate::models::{Cargo, Port};

/// Inclusive price bounds for one cargo type at one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest price the market can roll.
    pub min: u32,
    /// Highest price the market can roll.
    pub max: u32,
}

impl PriceRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within the bounds.
    pub fn contains(&self, price: u32) -> bool {
        (self.min..=self.max).contains(&price)
    }

    /// Draw a uniformly distributed price within the bounds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Rows follow [`Port::ALL`], columns follow [`Cargo::ALL`].
static PRICE_TABLE: [[PriceRange; 4]; 4] = [
    // Tondo
    [
        PriceRange::new(5, 15),
        PriceRange::new(8, 20),
        PriceRange::new(40, 80),
        PriceRange::new(120, 200),
    ],
    // Manila
    [
        PriceRange::new(10, 25),
        PriceRange::new(5, 12),
        PriceRange::new(50, 90),
        PriceRange::new(100, 180),
    ],
    // Pandakan
    [
        PriceRange::new(3, 10),
        PriceRange::new(12, 25),
        PriceRange::new(30, 60),
        PriceRange::new(150, 250),
    ],
    // Sapa
    [
        PriceRange::new(8, 18),
        PriceRange::new(10, 22),
        PriceRange::new(60, 110),
        PriceRange::new(90, 160),
    ],
];

/// Configured price bounds for `cargo` at `port`.
pub fn price_range(port: Port, cargo: Cargo) -> PriceRange {
    PRICE_TABLE[port.index()][cargo.index()]
}

/// Prices fixed for the duration of one turn at one port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    port: Port,
    prices: [u32; 4],
}

impl Market {
    /// Roll a fresh snapshot for `port`, each price drawn independently.
    pub fn generate<R: Rng + ?Sized>(port: Port, rng: &mut R) -> Self {
        let mut prices = [0; 4];
        for cargo in Cargo::ALL {
            prices[cargo.index()] = price_range(port, cargo).sample(rng);
        }
        Self { port, prices }
    }

    /// Build a snapshot with known prices, ordered like [`Cargo::ALL`].
    pub fn with_prices(port: Port, prices: [u32; 4]) -> Self {
        Self { port, prices }
    }

    /// Port the snapshot was rolled for.
    pub fn port(&self) -> Port {
        self.port
    }

    /// Current price of one unit of `cargo`.
    pub fn price(&self, cargo: Cargo) -> u32 {
        self.prices[cargo.index()]
    }

    /// Iterate `(cargo, price)` pairs in menu order.
    pub fn prices(&self) -> impl Iterator<Item = (Cargo, u32)> + '_ {
        Cargo::ALL.into_iter().map(|cargo| (cargo, self.price(cargo)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn table_ranges_are_well_formed() {
        for port in Port::ALL {
            for cargo in Cargo::ALL {
                let range = price_range(port, cargo);
                assert!(range.min >= 1, "{port} {cargo} allows free cargo");
                assert!(range.min <= range.max, "{port} {cargo} range inverted");
            }
        }
    }

    #[test]
    fn generated_prices_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for port in Port::ALL {
            for _ in 0..10_000 {
                let market = Market::generate(port, &mut rng);
                assert_eq!(market.port(), port);
                for (cargo, price) in market.prices() {
                    assert!(
                        price_range(port, cargo).contains(price),
                        "{cargo} at {port} rolled {price}"
                    );
                }
            }
        }
    }

    #[test]
    fn sampling_reaches_both_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = price_range(Port::Pandakan, Cargo::Coconut);
        let samples: Vec<u32> = (0..10_000).map(|_| range.sample(&mut rng)).collect();
        assert!(samples.contains(&range.min));
        assert!(samples.contains(&range.max));
    }

    #[test]
    fn same_seed_yields_same_snapshot() {
        let first = Market::generate(Port::Sapa, &mut StdRng::seed_from_u64(3));
        let second = Market::generate(Port::Sapa, &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }
}

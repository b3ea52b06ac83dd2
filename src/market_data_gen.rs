//! Synthetic order-flow generator.
//!
//! Deterministic, configurable order stream for replay tests, demos, and
//! benchmarks. Same seed ⇒ same sequence of orders.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::Engine;
use crate::error::BookError;
use crate::types::{Order, OrderId, OrderType, Price, Quantity, Side};

/// Configuration for the synthetic order generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
///
/// Order types are drawn by cumulative ratio: GoodTillCancel, then Market,
/// FillAndKill, FillOrKill, PostOnly; whatever probability mass remains goes
/// to StopOrder. Ratios should sum to at most 1.0.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same order stream.
    pub seed: u64,
    /// Number of orders to generate when collecting the full stream.
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0). Sell otherwise.
    pub buy_ratio: f64,
    /// Price range (inclusive) for limit and stop prices.
    pub price_min: Price,
    pub price_max: Price,
    /// Quantity range (inclusive), whole units.
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
    /// Order-type mix, by cumulative ratio.
    pub gtc_ratio: f64,
    pub market_ratio: f64,
    pub fill_and_kill_ratio: f64,
    pub fill_or_kill_ratio: f64,
    pub post_only_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            price_min: 95,
            price_max: 105,
            quantity_min: 1,
            quantity_max: 100,
            gtc_ratio: 0.7,
            market_ratio: 0.1,
            fill_and_kill_ratio: 0.1,
            fill_or_kill_ratio: 0.05,
            post_only_ratio: 0.05,
        }
    }
}

impl GeneratorConfig {
    /// A mix with only the given order types, split evenly over `self`'s
    /// remaining settings. Convenient for tests that need full
    /// observability of fills (e.g. no stop orders).
    pub fn with_types(mut self, types: &[OrderType]) -> Self {
        let share = 1.0 / types.len() as f64;
        self.gtc_ratio = 0.0;
        self.market_ratio = 0.0;
        self.fill_and_kill_ratio = 0.0;
        self.fill_or_kill_ratio = 0.0;
        self.post_only_ratio = 0.0;
        for t in types {
            match t {
                OrderType::GoodTillCancel => self.gtc_ratio = share,
                OrderType::Market => self.market_ratio = share,
                OrderType::FillAndKill => self.fill_and_kill_ratio = share,
                OrderType::FillOrKill => self.fill_or_kill_ratio = share,
                OrderType::PostOnly => self.post_only_ratio = share,
                OrderType::StopOrder => {} // the leftover mass
            }
        }
        self
    }
}

/// Deterministic order stream. Create with [`Generator::new`]; pull orders
/// with [`Generator::next_order`] or collect with [`Generator::all_orders`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order_id: u64,
}

impl Generator {
    /// Builds a generator with the given config. Same config (including seed) ⇒ same stream.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_order_id: 1,
        }
    }

    /// Generates the next order. Advances internal state (order id, RNG).
    pub fn next_order(&mut self) -> Order {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;

        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let price = self
            .rng
            .gen_range(self.config.price_min..=self.config.price_max);
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);

        let c = &self.config;
        let mut threshold = c.gtc_ratio;
        let r = self.rng.gen::<f64>();
        if r < threshold {
            return Order::new(OrderType::GoodTillCancel, id, side, price, quantity);
        }
        threshold += c.market_ratio;
        if r < threshold {
            return Order::new(OrderType::Market, id, side, 0, quantity);
        }
        threshold += c.fill_and_kill_ratio;
        if r < threshold {
            return Order::new(OrderType::FillAndKill, id, side, price, quantity);
        }
        threshold += c.fill_or_kill_ratio;
        if r < threshold {
            return Order::new(OrderType::FillOrKill, id, side, price, quantity);
        }
        threshold += c.post_only_ratio;
        if r < threshold {
            return Order::new(OrderType::PostOnly, id, side, price, quantity);
        }
        Order::new_stop(id, side, price, quantity)
    }

    /// Returns a vector of exactly `n` orders. Advances the generator state.
    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// Returns the full stream of orders as defined by `config.num_orders`.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}

/// Replays a sequence of orders into the engine. Returns the total trade
/// count (or the first error).
pub fn replay_into_engine(
    engine: &mut Engine,
    orders: impl IntoIterator<Item = Order>,
) -> Result<usize, BookError> {
    let mut total_trades = 0usize;
    for order in orders {
        total_trades += engine.add_order(order)?.len();
    }
    Ok(total_trades)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let c = GeneratorConfig {
            seed: 42,
            num_orders: 10,
            ..Default::default()
        };
        let orders1 = Generator::new(c.clone()).all_orders();
        let orders2 = Generator::new(c).all_orders();
        assert_eq!(orders1.len(), 10);
        assert_eq!(orders1, orders2);
    }

    #[test]
    fn different_seed_different_stream() {
        let o1 = Generator::new(GeneratorConfig {
            seed: 1,
            num_orders: 5,
            ..Default::default()
        })
        .all_orders();
        let o2 = Generator::new(GeneratorConfig {
            seed: 2,
            num_orders: 5,
            ..Default::default()
        })
        .all_orders();
        assert_ne!(o1, o2, "different seeds should produce different order content");
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let orders = Generator::new(GeneratorConfig {
            num_orders: 5,
            ..Default::default()
        })
        .all_orders();
        let ids: Vec<u64> = orders.iter().map(|o| o.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn with_types_restricts_the_mix() {
        let config = GeneratorConfig {
            num_orders: 200,
            ..Default::default()
        }
        .with_types(&[OrderType::GoodTillCancel, OrderType::Market]);
        for order in Generator::new(config).all_orders() {
            assert!(matches!(
                order.order_type(),
                OrderType::GoodTillCancel | OrderType::Market
            ));
        }
    }

    #[test]
    fn replay_into_engine_succeeds() {
        let mut engine = Engine::new();
        let orders = Generator::new(GeneratorConfig {
            seed: 123,
            num_orders: 200,
            ..Default::default()
        })
        .all_orders();
        let total_trades = replay_into_engine(&mut engine, orders).unwrap();
        assert!(total_trades > 0, "a mixed 200-order stream should trade");
    }
}

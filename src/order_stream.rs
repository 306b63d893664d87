//! Synthetic order stream.
//!
//! Deterministic, configurable limit orders for replay tests and benchmarks.
//! Same seed ⇒ same sequence of orders.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::execution::Execution;
use crate::order_book::OrderBook;
use crate::types::{Order, OrderIdGenerator, Price, Quantity, Side};

/// Configuration for the synthetic order generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same order stream.
    pub seed: u64,
    /// Number of orders [`Generator::all_orders`] yields.
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0). Sell otherwise.
    pub buy_ratio: f64,
    pub price_min: Price,
    pub price_max: Price,
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            price_min: 1,
            price_max: 20,
            quantity_min: 1,
            quantity_max: 10,
        }
    }
}

/// Deterministic order stream. Ids come from the generator's own [`OrderIdGenerator`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    ids: OrderIdGenerator,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            ids: OrderIdGenerator::new(),
        }
    }

    /// Generates the next order. Prices and quantities are clamped to at least 1.
    pub fn next_order(&mut self) -> Order {
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let price_min = self.config.price_min.max(1);
        let price = self
            .rng
            .gen_range(price_min..=self.config.price_max.max(price_min));
        let quantity_min = self.config.quantity_min.max(1);
        let quantity = self
            .rng
            .gen_range(quantity_min..=self.config.quantity_max.max(quantity_min));
        self.ids.new_order(side, quantity, price)
    }

    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// The full stream as defined by `config.num_orders`.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}

/// Feeds orders into the book in sequence and collects every execution.
pub fn replay_into_book(
    book: &mut OrderBook,
    orders: impl IntoIterator<Item = Order>,
) -> Vec<Execution> {
    let mut executions = Vec::new();
    for order in orders {
        executions.extend(book.add_order(order));
    }
    executions
}

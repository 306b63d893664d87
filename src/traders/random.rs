//! Noise traders driven by a seeded RNG.

use crate::config::MarketConfig;
use crate::trader::{Account, Market, Trader};
use crate::types::{Price, Quantity, Side};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_side(rng: &mut StdRng) -> Side {
    if rng.gen_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    }
}

/// Now and then places a limit order at a random price and size.
#[derive(Clone, Debug)]
pub struct RandomTrader {
    account: Account,
    rng: StdRng,
    trade_chance: f64,
    max_quantity: Quantity,
    max_price: Price,
}

impl RandomTrader {
    /// Trades on 10% of ticks, up to 10 shares, priced up to the market's max price.
    pub fn new(config: &MarketConfig, seed: u64) -> Self {
        Self::with_params(config, seed, 0.1, 10, config.max_price)
    }

    pub fn with_params(
        config: &MarketConfig,
        seed: u64,
        trade_chance: f64,
        max_quantity: Quantity,
        max_price: Price,
    ) -> Self {
        Self {
            account: Account::from_config(config),
            rng: StdRng::seed_from_u64(seed),
            trade_chance,
            max_quantity: max_quantity.max(1),
            max_price: max_price.max(1),
        }
    }
}

impl Trader for RandomTrader {
    fn name(&self) -> &'static str {
        "random"
    }

    fn account(&self) -> &Account {
        &self.account
    }

    fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn tick(&mut self, market: &mut Market<'_>) {
        if self.rng.gen::<f64>() >= self.trade_chance {
            return;
        }
        let side = random_side(&mut self.rng);
        let price = self.rng.gen_range(1..=self.max_price);
        let quantity = self.rng.gen_range(1..=self.max_quantity);
        if let Err(err) = self.account.submit_order(market, side, quantity, price) {
            trace!("random order skipped trader={}: {}", market.trader_id().0, err);
        }
    }
}

/// Now and then takes liquidity by pricing at the edge of the market band.
#[derive(Clone, Debug)]
pub struct RandomMarketOrderTrader {
    account: Account,
    rng: StdRng,
    trade_chance: f64,
    trade_quantity: Quantity,
}

impl RandomMarketOrderTrader {
    /// Trades 10 shares on 10% of ticks.
    pub fn new(config: &MarketConfig, seed: u64) -> Self {
        Self::with_params(config, seed, 0.1, 10)
    }

    pub fn with_params(
        config: &MarketConfig,
        seed: u64,
        trade_chance: f64,
        trade_quantity: Quantity,
    ) -> Self {
        Self {
            account: Account::from_config(config),
            rng: StdRng::seed_from_u64(seed),
            trade_chance,
            trade_quantity: trade_quantity.max(1),
        }
    }
}

impl Trader for RandomMarketOrderTrader {
    fn name(&self) -> &'static str {
        "random_market_order"
    }

    fn account(&self) -> &Account {
        &self.account
    }

    fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn tick(&mut self, market: &mut Market<'_>) {
        if self.rng.gen::<f64>() >= self.trade_chance {
            return;
        }
        let side = random_side(&mut self.rng);
        let price = match side {
            Side::Buy => market.config().max_price,
            Side::Sell => market.config().min_price,
        };
        if let Err(err) = self
            .account
            .submit_order(market, side, self.trade_quantity, price)
        {
            trace!("market order skipped trader={}: {}", market.trader_id().0, err);
        }
    }
}

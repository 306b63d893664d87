//! Simulation wiring: builds an [`Exchange`] and its traders from a [`SimConfig`].

use crate::config::SimConfig;
use crate::display::render_ladder;
use crate::error::Result;
use crate::exchange::Exchange;
use crate::traders::{DealerTrader, RandomMarketOrderTrader, RandomTrader, SpreadTrader};
use crate::types::TraderId;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// End-of-run balances for one trader.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraderSummary {
    pub trader: TraderId,
    pub policy: &'static str,
    pub money: i64,
    pub shares: i64,
    pub open_orders: usize,
}

pub struct Simulation {
    config: SimConfig,
    exchange: Exchange,
}

impl Simulation {
    /// Validates `config` and registers traders: random, random market order,
    /// dealer, then spread. Each random trader gets its own seed drawn from `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let market = &config.market;
        let mut seeds = StdRng::seed_from_u64(config.seed);
        let mut exchange = Exchange::new(market.clone());
        for _ in 0..config.random_traders {
            exchange.add_trader(RandomTrader::with_params(
                market,
                seeds.gen(),
                config.trade_chance,
                10,
                market.max_price,
            ));
        }
        for _ in 0..config.random_market_order_traders {
            exchange.add_trader(RandomMarketOrderTrader::with_params(
                market,
                seeds.gen(),
                config.trade_chance,
                10,
            ));
        }
        for _ in 0..config.dealer_traders {
            exchange.add_trader(DealerTrader::new(market));
        }
        for _ in 0..config.spread_traders {
            exchange.add_trader(SpreadTrader::new(market));
        }
        info!(
            "simulation ready seed={} traders={} price_band={}..={}",
            config.seed,
            exchange.traders().count(),
            market.min_price,
            market.max_price
        );
        Ok(Self { config, exchange })
    }

    pub fn step(&mut self) {
        self.exchange.tick();
    }

    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.exchange.tick();
        }
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The book as a ladder over the configured price band.
    pub fn frame(&self) -> String {
        render_ladder(
            self.exchange.book(),
            self.config.market.min_price,
            self.config.market.max_price,
        )
    }

    pub fn summary(&self) -> Vec<TraderSummary> {
        self.exchange
            .traders()
            .map(|(trader, t)| TraderSummary {
                trader,
                policy: t.name(),
                money: t.account().money(),
                shares: t.account().shares(),
                open_orders: t.account().open_orders().count(),
            })
            .collect()
    }
}

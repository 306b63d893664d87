//! Simulation configuration.
//!
//! [`SimConfig::load`] reads the JSON file named by `SIM_CONFIG` (if set), then
//! applies `SIM_SEED`, `SIM_TICKS` and `SIM_TICK_INTERVAL_MS` overrides.
//! Missing fields fall back to [`Default`].

use crate::error::{Result, SimError};
use crate::types::Price;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Market parameters visible to participants. The book itself accepts any positive price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Lowest price participants quote and the display shows.
    pub min_price: Price,
    /// Highest price participants quote and the display shows.
    pub max_price: Price,
    /// Money each participant starts with.
    pub starting_capital: i64,
    /// Shares each participant starts with.
    pub starting_position: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            min_price: 1,
            max_price: 20,
            starting_capital: 1000,
            starting_position: 100,
        }
    }
}

/// Full simulation setup: market, participant mix, and run loop pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for every random participant. Same seed ⇒ same run.
    pub seed: u64,
    /// Number of exchange ticks to run; 0 runs until interrupted.
    pub ticks: u64,
    /// Pause between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Print the ladder every N ticks; 0 disables rendering.
    pub render_every: u64,
    pub market: MarketConfig,
    pub random_traders: usize,
    pub random_market_order_traders: usize,
    pub dealer_traders: usize,
    pub spread_traders: usize,
    /// Per-tick probability that a random participant trades.
    pub trade_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks: 1000,
            tick_interval_ms: 100,
            render_every: 1,
            market: MarketConfig::default(),
            random_traders: 5,
            random_market_order_traders: 0,
            dealer_traders: 0,
            spread_traders: 0,
            trade_chance: 0.1,
        }
    }
}

impl SimConfig {
    /// Load from `SIM_CONFIG` and environment overrides, then validate.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("SIM_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Apply `SIM_*` overrides from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SIM_SEED") {
            self.seed = parse_var("SIM_SEED", &v)?;
        }
        if let Some(v) = lookup("SIM_TICKS") {
            self.ticks = parse_var("SIM_TICKS", &v)?;
        }
        if let Some(v) = lookup("SIM_TICK_INTERVAL_MS") {
            self.tick_interval_ms = parse_var("SIM_TICK_INTERVAL_MS", &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.market.min_price == 0 {
            return Err(SimError::Config("min_price must be positive".into()));
        }
        if self.market.min_price > self.market.max_price {
            return Err(SimError::Config(format!(
                "min_price {} exceeds max_price {}",
                self.market.min_price, self.market.max_price
            )));
        }
        if !(0.0..=1.0).contains(&self.trade_chance) {
            return Err(SimError::Config(format!(
                "trade_chance {} outside 0..=1",
                self.trade_chance
            )));
        }
        Ok(())
    }
}

fn parse_var(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| SimError::Config(format!("{} is not a number: {:?}", key, value)))
}

use crate::config::MarketConfig;
use crate::trader::{affordable, Account, Market, Trader};
use crate::types::{Price, Side};
use log::trace;

/// Quotes both sides around a fixed midpoint with all free capacity.
#[derive(Clone, Debug)]
pub struct DealerTrader {
    account: Account,
    midpoint: Price,
    spread: Price,
}

impl DealerTrader {
    /// Midpoint at half the market band, spread of 2.
    pub fn new(config: &MarketConfig) -> Self {
        let midpoint = config.max_price.saturating_sub(config.min_price) / 2;
        Self::with_quote(config, midpoint, 2)
    }

    pub fn with_quote(config: &MarketConfig, midpoint: Price, spread: Price) -> Self {
        Self {
            account: Account::from_config(config),
            midpoint,
            spread,
        }
    }

    pub fn bid_price(&self) -> Price {
        self.midpoint.saturating_sub(self.spread)
    }

    pub fn ask_price(&self) -> Price {
        self.midpoint.saturating_add(self.spread)
    }
}

impl Trader for DealerTrader {
    fn name(&self) -> &'static str {
        "dealer"
    }

    fn account(&self) -> &Account {
        &self.account
    }

    fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn tick(&mut self, market: &mut Market<'_>) {
        let bid = self.bid_price();
        if let Some(quantity) = affordable(self.account.free_money(), bid) {
            if let Err(err) = self.account.submit_order(market, Side::Buy, quantity, bid) {
                trace!("dealer bid skipped: {}", err);
            }
        }
        let ask = self.ask_price();
        let free_shares = self.account.free_shares();
        if ask > 0 && free_shares > 0 {
            if let Err(err) = self
                .account
                .submit_order(market, Side::Sell, free_shares.unsigned_abs(), ask)
            {
                trace!("dealer ask skipped: {}", err);
            }
        }
    }
}

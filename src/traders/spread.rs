use crate::config::MarketConfig;
use crate::matching::trade_price;
use crate::trader::{affordable, Account, Market, Trader};
use crate::types::Side;
use log::trace;

/// Follows the book: buys at the mid and offers one tick above it.
#[derive(Clone, Debug)]
pub struct SpreadTrader {
    account: Account,
}

impl SpreadTrader {
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            account: Account::from_config(config),
        }
    }
}

impl Trader for SpreadTrader {
    fn name(&self) -> &'static str {
        "spread"
    }

    fn account(&self) -> &Account {
        &self.account
    }

    fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn tick(&mut self, market: &mut Market<'_>) {
        let book = market.book();
        if !(book.has_bid() && book.has_offer()) {
            return;
        }
        let mid = trade_price(book.best_bid(), book.best_offer());

        if let Some(quantity) = affordable(self.account.free_money(), mid) {
            if let Err(err) = self.account.submit_order(market, Side::Buy, quantity, mid) {
                trace!("spread bid skipped: {}", err);
            }
        }
        let free_shares = self.account.free_shares();
        if free_shares > 0 {
            if let Err(err) = self
                .account
                .submit_order(market, Side::Sell, free_shares.unsigned_abs(), mid.saturating_add(1))
            {
                trace!("spread ask skipped: {}", err);
            }
        }
    }
}

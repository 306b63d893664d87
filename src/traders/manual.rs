use crate::config::MarketConfig;
use crate::trader::{Account, Market, Trader};
use crate::types::{OrderId, Price, Quantity, Side};
use log::warn;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Intent {
    Order {
        side: Side,
        quantity: Quantity,
        price: Price,
    },
    Cancel(OrderId),
}

/// Submits exactly what it was told to, on its next tick.
#[derive(Clone, Debug)]
pub struct ManualTrader {
    account: Account,
    pending: VecDeque<Intent>,
}

impl ManualTrader {
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            account: Account::from_config(config),
            pending: VecDeque::new(),
        }
    }

    /// Queue an order for the next tick.
    pub fn pen_order(&mut self, side: Side, quantity: Quantity, price: Price) {
        self.pending.push_back(Intent::Order {
            side,
            quantity,
            price,
        });
    }

    /// Queue a cancel for the next tick.
    pub fn pen_cancel(&mut self, order_id: OrderId) {
        self.pending.push_back(Intent::Cancel(order_id));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Trader for ManualTrader {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn account(&self) -> &Account {
        &self.account
    }

    fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn tick(&mut self, market: &mut Market<'_>) {
        while let Some(intent) = self.pending.pop_front() {
            match intent {
                Intent::Order {
                    side,
                    quantity,
                    price,
                } => {
                    if let Err(err) = self.account.submit_order(market, side, quantity, price) {
                        warn!(
                            "manual order dropped trader={} side={:?} quantity={} price={}: {}",
                            market.trader_id().0,
                            side,
                            quantity,
                            price,
                            err
                        );
                    }
                }
                Intent::Cancel(order_id) => market.submit_cancel(order_id),
            }
        }
    }
}

//! Participant contract.
//!
//! A [`Trader`] is a policy the [`crate::Exchange`] ticks and notifies. Its
//! money and shares live in an [`Account`], which reserves capacity for open
//! orders so free balances only count what new orders may use. During its tick
//! a trader sees the book through a [`Market`] and may only enqueue requests.

use crate::config::MarketConfig;
use crate::error::{Result, SimError};
use crate::exchange::Request;
use crate::execution::Fill;
use crate::order_book::OrderBook;
use crate::types::{Order, OrderId, OrderIdGenerator, Price, Quantity, Side, TraderId};
use std::collections::{BTreeMap, VecDeque};

/// Policy interface for exchange participants.
pub trait Trader {
    /// Short policy name for logs and summaries.
    fn name(&self) -> &'static str;

    fn account(&self) -> &Account;

    fn account_mut(&mut self) -> &mut Account;

    /// Called when the exchange has nothing queued. Orders placed here are
    /// admitted on later ticks.
    fn tick(&mut self, market: &mut Market<'_>);

    /// The order reached the book. Reservation already happened at submit time.
    fn notify_order_accepted(&mut self, _order: &Order) {}

    /// One of this trader's orders traded.
    fn notify_traded(&mut self, fill: &Fill) {
        self.account_mut().apply_fill(fill);
    }

    /// One of this trader's orders was cancelled; `order` holds the unfilled remainder.
    fn notify_cancelled(&mut self, order: &Order) {
        self.account_mut().release(order);
    }
}

/// A trader's view of the exchange during its tick.
pub struct Market<'a> {
    trader_id: TraderId,
    book: &'a OrderBook,
    config: &'a MarketConfig,
    ids: &'a mut OrderIdGenerator,
    requests: &'a mut VecDeque<Request>,
}

impl<'a> Market<'a> {
    pub(crate) fn new(
        trader_id: TraderId,
        book: &'a OrderBook,
        config: &'a MarketConfig,
        ids: &'a mut OrderIdGenerator,
        requests: &'a mut VecDeque<Request>,
    ) -> Self {
        Self {
            trader_id,
            book,
            config,
            ids,
            requests,
        }
    }

    pub fn trader_id(&self) -> TraderId {
        self.trader_id
    }

    pub fn book(&self) -> &OrderBook {
        self.book
    }

    pub fn config(&self) -> &MarketConfig {
        self.config
    }

    /// Build an order with a fresh exchange-wide id.
    pub fn new_order(&mut self, side: Side, quantity: Quantity, price: Price) -> Order {
        self.ids.new_order(side, quantity, price)
    }

    /// Queue an order for admission. No balance checks; see [`Account::submit_order`].
    pub fn submit_order(&mut self, order: Order) {
        self.requests.push_back(Request::Order {
            trader: self.trader_id,
            order,
        });
    }

    /// Queue a cancel behind everything already submitted.
    pub fn submit_cancel(&mut self, order_id: OrderId) {
        self.requests.push_back(Request::Cancel {
            trader: self.trader_id,
            order_id,
        });
    }
}

/// Money and share balances with reservations for open orders.
#[derive(Clone, Debug)]
pub struct Account {
    money: i64,
    shares: i64,
    /// Money locked by unfilled buy orders, at their limit prices.
    money_outstanding: i64,
    /// Shares locked by unfilled sell orders.
    shares_outstanding: i64,
    /// Orders holding a reservation, with their unfilled quantity.
    open_orders: BTreeMap<OrderId, Order>,
}

impl Account {
    pub fn new(money: i64, shares: i64) -> Self {
        Self {
            money,
            shares,
            money_outstanding: 0,
            shares_outstanding: 0,
            open_orders: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.starting_capital, config.starting_position)
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn money_outstanding(&self) -> i64 {
        self.money_outstanding
    }

    pub fn shares_outstanding(&self) -> i64 {
        self.shares_outstanding
    }

    pub fn free_money(&self) -> i64 {
        self.money.saturating_sub(self.money_outstanding)
    }

    pub fn free_shares(&self) -> i64 {
        self.shares.saturating_sub(self.shares_outstanding)
    }

    pub fn open_orders(&self) -> impl Iterator<Item = &Order> {
        self.open_orders.values()
    }

    pub fn open_order(&self, order_id: OrderId) -> Option<&Order> {
        self.open_orders.get(&order_id)
    }

    /// Err if free capacity cannot cover a new order of this shape.
    pub fn check_capacity(&self, side: Side, quantity: Quantity, price: Price) -> Result<()> {
        match side {
            Side::Buy => {
                let required = cash(price, quantity);
                if required > self.free_money() {
                    return Err(SimError::InsufficientMoney {
                        required,
                        available: self.free_money(),
                    });
                }
            }
            Side::Sell => {
                let required = units(quantity);
                if required > self.free_shares() {
                    return Err(SimError::InsufficientShares {
                        required,
                        available: self.free_shares(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Reserve capacity and queue the order. On error nothing is reserved or queued.
    pub fn submit_order(
        &mut self,
        market: &mut Market<'_>,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Result<OrderId> {
        self.check_capacity(side, quantity, price)?;
        let order = market.new_order(side, quantity, price);
        let order_id = order.id;
        self.reserve(order.clone());
        market.submit_order(order);
        Ok(order_id)
    }

    fn reserve(&mut self, order: Order) {
        match order.side {
            Side::Buy => {
                self.money_outstanding = self
                    .money_outstanding
                    .saturating_add(cash(order.price, order.quantity))
            }
            Side::Sell => {
                self.shares_outstanding = self.shares_outstanding.saturating_add(units(order.quantity))
            }
        }
        assert!(
            self.free_money() >= 0 && self.free_shares() >= 0,
            "reservation for order {} exceeds free capacity",
            order.id.0
        );
        self.open_orders.insert(order.id, order);
    }

    /// Release the reservation for the traded part at the order's limit price and
    /// book cash and shares at the execution price. Fills for orders this account
    /// never reserved only change balances.
    pub fn apply_fill(&mut self, fill: &Fill) {
        let quantity = units(fill.quantity);
        if let Some(open) = self.open_orders.get_mut(&fill.order_id) {
            match fill.side {
                Side::Buy => {
                    self.money_outstanding = self
                        .money_outstanding
                        .saturating_sub(cash(fill.limit_price, fill.quantity))
                }
                Side::Sell => self.shares_outstanding = self.shares_outstanding.saturating_sub(quantity),
            }
            open.quantity = open.quantity.saturating_sub(fill.quantity);
            if open.quantity == 0 {
                self.open_orders.remove(&fill.order_id);
            }
        }
        let paid = cash(fill.price, fill.quantity);
        match fill.side {
            Side::Buy => {
                self.money = self.money.saturating_sub(paid);
                self.shares = self.shares.saturating_add(quantity);
            }
            Side::Sell => {
                self.money = self.money.saturating_add(paid);
                self.shares = self.shares.saturating_sub(quantity);
            }
        }
    }

    /// Drop the reservation still held by a cancelled order.
    pub fn release(&mut self, order: &Order) {
        let Some(open) = self.open_orders.remove(&order.id) else {
            return;
        };
        match open.side {
            Side::Buy => {
                self.money_outstanding = self
                    .money_outstanding
                    .saturating_sub(cash(open.price, open.quantity))
            }
            Side::Sell => {
                self.shares_outstanding = self.shares_outstanding.saturating_sub(units(open.quantity))
            }
        }
    }
}

/// Whole shares `free_money` buys at `price`, if at least one.
pub(crate) fn affordable(free_money: i64, price: Price) -> Option<Quantity> {
    let price = i64::try_from(price).ok().filter(|p| *p > 0)?;
    let quantity = free_money / price;
    (quantity > 0).then(|| quantity.unsigned_abs())
}

// Balance arithmetic saturates at the i64 bounds instead of wrapping or panicking.

/// Share count as a balance.
fn units(quantity: Quantity) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}

/// Money for `quantity` at `price`. The product is exact in u128.
fn cash(price: Price, quantity: Quantity) -> i64 {
    i64::try_from(u128::from(price) * u128::from(quantity)).unwrap_or(i64::MAX)
}

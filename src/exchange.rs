//! Tick-driven dispatcher.
//!
//! [`Exchange`] owns the book, the request queue, the registered traders and the
//! order→owner map. Each [`Exchange::tick`] does one unit of work: drain one
//! queued request into the book, or, when nothing is queued, tick every trader.

use crate::config::MarketConfig;
use crate::error::{Result, SimError};
use crate::events::{EventSink, ExchangeEvent, LogEventSink};
use crate::order_book::OrderBook;
use crate::trader::{Market, Trader};
use crate::types::{Order, OrderId, OrderIdGenerator, Price, Quantity, Side, TraderId};
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

/// Queued unit of work, tagged with the submitting trader.
#[derive(Clone, Debug)]
pub(crate) enum Request {
    Order { trader: TraderId, order: Order },
    Cancel { trader: TraderId, order_id: OrderId },
}

/// Single-instrument exchange.
///
/// Submit with [`Exchange::submit_order`] / [`Exchange::submit_cancel`] or let
/// traders submit from their tick; nothing reaches the book until
/// [`Exchange::tick`] drains it.
pub struct Exchange {
    book: OrderBook,
    config: MarketConfig,
    traders: Vec<Box<dyn Trader>>,
    requests: VecDeque<Request>,
    /// Live orders → owner. Entries are dropped once an order fills or is cancelled.
    owners: HashMap<OrderId, TraderId>,
    ids: OrderIdGenerator,
    sink: Box<dyn EventSink>,
    ticks: u64,
}

impl Exchange {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            book: OrderBook::new(),
            config,
            traders: Vec::new(),
            requests: VecDeque::new(),
            owners: HashMap::new(),
            ids: OrderIdGenerator::new(),
            sink: Box::new(LogEventSink),
            ticks: 0,
        }
    }

    /// Replace the default log sink.
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Register a trader. Traders are ticked in registration order.
    pub fn add_trader(&mut self, trader: impl Trader + 'static) -> TraderId {
        let id = TraderId(self.traders.len() as u64);
        debug!("trader registered trader={} policy={}", id.0, trader.name());
        self.traders.push(Box::new(trader));
        id
    }

    pub fn trader(&self, id: TraderId) -> Option<&dyn Trader> {
        self.traders.get(id.0 as usize).map(|t| t.as_ref())
    }

    pub fn traders(&self) -> impl Iterator<Item = (TraderId, &dyn Trader)> {
        self.traders
            .iter()
            .enumerate()
            .map(|(i, t)| (TraderId(i as u64), t.as_ref()))
    }

    /// Build an order with a fresh id from this exchange's generator.
    pub fn new_order(&mut self, side: Side, quantity: Quantity, price: Price) -> Order {
        self.ids.new_order(side, quantity, price)
    }

    /// Queue an order on behalf of `trader`. Does not touch the book or any balances.
    ///
    /// Rejects an id that is live in the book or already queued.
    pub fn submit_order(&mut self, trader: TraderId, order: Order) -> Result<()> {
        self.ensure_registered(trader)?;
        if self.owners.contains_key(&order.id) || self.is_queued(order.id) {
            warn!(
                "duplicate order rejected trader={} order_id={}",
                trader.0, order.id.0
            );
            return Err(SimError::DuplicateOrder(order.id));
        }
        self.requests.push_back(Request::Order { trader, order });
        Ok(())
    }

    /// Queue a cancel; it is processed in FIFO order with admissions.
    pub fn submit_cancel(&mut self, trader: TraderId, order_id: OrderId) -> Result<()> {
        self.ensure_registered(trader)?;
        self.requests.push_back(Request::Cancel { trader, order_id });
        Ok(())
    }

    fn is_queued(&self, order_id: OrderId) -> bool {
        self.requests
            .iter()
            .any(|r| matches!(r, Request::Order { order, .. } if order.id == order_id))
    }

    fn ensure_registered(&self, trader: TraderId) -> Result<()> {
        if (trader.0 as usize) < self.traders.len() {
            Ok(())
        } else {
            Err(SimError::UnknownTrader(trader))
        }
    }

    /// Advance by one unit of work.
    pub fn tick(&mut self) {
        self.ticks += 1;
        match self.requests.pop_front() {
            None => self.tick_traders(),
            Some(Request::Order { trader, order }) => self.admit(trader, order),
            Some(Request::Cancel { trader, order_id }) => self.cancel(trader, order_id),
        }
    }

    fn tick_traders(&mut self) {
        let Self {
            book,
            config,
            traders,
            requests,
            ids,
            ..
        } = self;
        for (index, trader) in traders.iter_mut().enumerate() {
            let mut market = Market::new(TraderId(index as u64), book, config, ids, requests);
            trader.tick(&mut market);
        }
    }

    fn admit(&mut self, trader: TraderId, order: Order) {
        debug!(
            "order admitted tick={} trader={} order_id={} side={:?} quantity={} price={}",
            self.ticks, trader.0, order.id.0, order.side, order.quantity, order.price
        );
        self.owners.insert(order.id, trader);
        if let Some(owner) = self.traders.get_mut(trader.0 as usize) {
            owner.notify_order_accepted(&order);
        }
        self.sink.emit(&ExchangeEvent::Accepted {
            tick: self.ticks,
            trader,
            order: order.clone(),
        });

        let executions = self.book.add_order(order);
        for execution in executions {
            debug!(
                "trade tick={} buy_order={} sell_order={} price={} quantity={} aggressor={:?}",
                self.ticks,
                execution.buy_order.id.0,
                execution.sell_order.id.0,
                execution.price,
                execution.quantity,
                execution.side
            );
            for side in [Side::Buy, Side::Sell] {
                let fill = execution.fill(side);
                match self.owners.get(&fill.order_id) {
                    Some(owner) => {
                        if let Some(t) = self.traders.get_mut(owner.0 as usize) {
                            t.notify_traded(&fill);
                        }
                    }
                    None => warn!("trade for untracked order order_id={}", fill.order_id.0),
                }
                if fill.completed {
                    self.owners.remove(&fill.order_id);
                }
            }
            self.sink.emit(&ExchangeEvent::Traded {
                tick: self.ticks,
                execution,
            });
        }
    }

    fn cancel(&mut self, trader: TraderId, order_id: OrderId) {
        let owned = self.owners.get(&order_id) == Some(&trader);
        let removed = if owned {
            self.book.remove_order(order_id)
        } else {
            None
        };
        let Some(order) = removed else {
            warn!(
                "cancel rejected tick={} trader={} order_id={} owner={:?}",
                self.ticks,
                trader.0,
                order_id.0,
                self.owners.get(&order_id).map(|t| t.0)
            );
            self.sink.emit(&ExchangeEvent::CancelRejected {
                tick: self.ticks,
                trader,
                order_id,
            });
            return;
        };
        debug!(
            "order canceled tick={} trader={} order_id={} remaining={}",
            self.ticks, trader.0, order_id.0, order.quantity
        );
        self.owners.remove(&order_id);
        if let Some(owner) = self.traders.get_mut(trader.0 as usize) {
            owner.notify_cancelled(&order);
        }
        self.sink.emit(&ExchangeEvent::Cancelled {
            tick: self.ticks,
            trader,
            order,
        });
    }

    /// Read-only view of the book.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Requests waiting for admission.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// Orders the exchange still routes notifications for.
    pub fn tracked_orders(&self) -> usize {
        self.owners.len()
    }

    /// Owner of a live order.
    pub fn owner_of(&self, order_id: OrderId) -> Option<TraderId> {
        self.owners.get(&order_id).copied()
    }

    /// Number of `tick` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

//! Single-instrument order book: bid and ask ladders, price-time priority.
//!
//! Each price level is FIFO; best bid is the highest price, best offer the lowest.
//! Incoming orders go through [`OrderBook::add_order`], which crosses them via
//! [`crate::matching`] before resting any remainder.

use crate::execution::Execution;
use crate::matching::{match_order, trade};
use crate::types::{Order, OrderId, Price, Quantity, Side};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Orders resting at one price, oldest first.
type Level = VecDeque<Order>;
/// Price -> level. Bids read from the back, asks from the front.
type Ladder = BTreeMap<Price, Level>;

/// Best bid reported by an empty bid ladder.
pub const NO_BID: Price = Price::MIN;
/// Best offer reported by an empty ask ladder.
pub const NO_OFFER: Price = Price::MAX;

/// Single-instrument order book.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: Ladder,
    asks: Ladder,
    /// Resting orders by id for cancel: (side, price).
    index: HashMap<OrderId, (Side, Price)>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crosses `order` against the opposite ladder and rests any remainder.
    ///
    /// Returns one [`Execution`] per resting order touched, in trade order.
    ///
    /// # Panics
    ///
    /// If the order's price or quantity is zero, or its id is already resting.
    pub fn add_order(&mut self, order: Order) -> Vec<Execution> {
        match_order(self, order)
    }

    /// Remove a resting order by id. Returns true if found and removed.
    pub fn cancel_order(&mut self, order_id: OrderId) -> bool {
        self.remove_order(order_id).is_some()
    }

    /// Remove a resting order by id and hand back what was left of it.
    pub fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
        let (side, price) = self.index.remove(&order_id)?;
        let ladder = self.ladder_mut(side);
        let level = ladder.get_mut(&price)?;
        let position = level.iter().position(|o| o.id == order_id)?;
        let removed = level.remove(position);
        if level.is_empty() {
            ladder.remove(&price);
        }
        removed
    }

    /// Trade `aggressor` against the best opposite levels while they cross.
    /// Decrements both sides; consumed resting orders and emptied levels are removed.
    pub(crate) fn take_liquidity(&mut self, aggressor: &mut Order) -> Vec<Execution> {
        let mut executions = Vec::new();
        while aggressor.quantity > 0 {
            let mut level = match aggressor.side {
                Side::Buy => match self.asks.first_entry() {
                    Some(entry) if *entry.key() <= aggressor.price => entry,
                    _ => break,
                },
                Side::Sell => match self.bids.last_entry() {
                    Some(entry) if *entry.key() >= aggressor.price => entry,
                    _ => break,
                },
            };
            let queue = level.get_mut();
            let Some(resting) = queue.front_mut() else {
                level.remove();
                continue;
            };
            executions.push(trade(aggressor, resting));
            if resting.quantity == 0 {
                if let Some(filled) = queue.pop_front() {
                    self.index.remove(&filled.id);
                }
                if queue.is_empty() {
                    level.remove();
                }
            }
        }
        executions
    }

    /// Append an order to the tail of its price level. No matching.
    pub(crate) fn rest_order(&mut self, order: Order) {
        self.index.insert(order.id, (order.side, order.price));
        self.ladder_mut(order.side)
            .entry(order.price)
            .or_default()
            .push_back(order);
    }

    fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Whether the book has a buy order, at any price.
    pub fn has_bid(&self) -> bool {
        !self.bids.is_empty()
    }

    /// Whether the book has a sell order, at any price.
    pub fn has_offer(&self) -> bool {
        !self.asks.is_empty()
    }

    /// Best bid price, or [`NO_BID`] if there are no bids.
    pub fn best_bid(&self) -> Price {
        self.bids.keys().next_back().copied().unwrap_or(NO_BID)
    }

    /// Best offer price, or [`NO_OFFER`] if there are no asks.
    pub fn best_offer(&self) -> Price {
        self.asks.keys().next().copied().unwrap_or(NO_OFFER)
    }

    /// Side a price sits on: bid if at or below the best bid, otherwise ask.
    /// Indeterminate for prices inside the spread.
    pub fn side_for_level(&self, price: Price) -> Side {
        if price <= self.best_bid() {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// Total resting quantity at `price` on the side [`Self::side_for_level`] picks.
    pub fn quantity_for_level(&self, price: Price) -> Quantity {
        self.ladder(self.side_for_level(price))
            .get(&price)
            .map(|level| level.iter().map(|o| o.quantity).sum())
            .unwrap_or(0)
    }

    /// Resting order by id.
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        let (side, price) = self.index.get(&order_id)?;
        self.ladder(*side)
            .get(price)?
            .iter()
            .find(|o| o.id == order_id)
    }

    /// Whether an order with this id is resting.
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Number of resting orders on both sides.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Sum of resting quantity on one side.
    pub fn resting_quantity(&self, side: Side) -> Quantity {
        self.ladder(side)
            .values()
            .flat_map(|level| level.iter())
            .map(|o| o.quantity)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderIdGenerator;

    #[test]
    fn non_matching_orders_rest() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        assert!(book.add_order(ids.new_order(Side::Buy, 10, 5)).is_empty());
        assert!(book.add_order(ids.new_order(Side::Sell, 10, 10)).is_empty());
        assert!(book.add_order(ids.new_order(Side::Buy, 10, 5)).is_empty());
        assert!(book.add_order(ids.new_order(Side::Sell, 10, 10)).is_empty());
        assert_eq!(book.order_count(), 4);
        assert_eq!(book.quantity_for_level(5), 20);
        assert_eq!(book.quantity_for_level(10), 20);
    }

    #[test]
    fn empty_book_reports_sentinels() {
        let book = OrderBook::new();
        assert!(!book.has_bid());
        assert!(!book.has_offer());
        assert_eq!(book.best_bid(), NO_BID);
        assert_eq!(book.best_offer(), NO_OFFER);
        assert_eq!(book.quantity_for_level(7), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn best_bid_and_offer() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        book.add_order(ids.new_order(Side::Buy, 10, 5));
        book.add_order(ids.new_order(Side::Buy, 10, 10));
        assert!(book.has_bid());
        assert!(!book.has_offer());
        book.add_order(ids.new_order(Side::Sell, 10, 15));
        book.add_order(ids.new_order(Side::Sell, 10, 20));
        assert!(book.has_offer());
        assert_eq!(book.best_bid(), 10);
        assert_eq!(book.best_offer(), 15);
    }

    #[test]
    fn side_for_level() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        book.add_order(ids.new_order(Side::Buy, 10, 10));
        book.add_order(ids.new_order(Side::Sell, 10, 11));
        assert_eq!(book.side_for_level(10), Side::Buy);
        assert_eq!(book.side_for_level(11), Side::Sell);
        assert_eq!(book.side_for_level(5), Side::Buy);
        assert_eq!(book.side_for_level(20), Side::Sell);
    }

    #[test]
    fn quantity_for_level() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        book.add_order(ids.new_order(Side::Buy, 10, 9));
        book.add_order(ids.new_order(Side::Buy, 10, 10));
        book.add_order(ids.new_order(Side::Buy, 10, 10));
        book.add_order(ids.new_order(Side::Sell, 10, 11));
        book.add_order(ids.new_order(Side::Sell, 10, 11));
        book.add_order(ids.new_order(Side::Sell, 10, 13));
        assert_eq!(book.quantity_for_level(5), 0);
        assert_eq!(book.quantity_for_level(9), 10);
        assert_eq!(book.quantity_for_level(10), 20);
        assert_eq!(book.quantity_for_level(11), 20);
        assert_eq!(book.quantity_for_level(12), 0);
        assert_eq!(book.quantity_for_level(13), 10);
        assert_eq!(book.quantity_for_level(20), 0);
    }

    #[test]
    fn cancel_order() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        let o1 = ids.new_order(Side::Buy, 10, 10);
        let o2 = ids.new_order(Side::Buy, 10, 20);
        book.add_order(o1.clone());
        book.add_order(o2.clone());
        assert!(book.cancel_order(o1.id));
        assert_eq!(book.quantity_for_level(10), 0);

        // o3 fully fills against o2, o4 rests.
        let o3 = ids.new_order(Side::Sell, 10, 20);
        let o4 = ids.new_order(Side::Sell, 5, 30);
        book.add_order(o3.clone());
        book.add_order(o4.clone());
        assert!(!book.cancel_order(o2.id));
        assert!(!book.cancel_order(o3.id));
        assert!(book.cancel_order(o4.id));
        assert!(book.is_empty());
    }

    #[test]
    fn cancel_twice_returns_false_and_changes_nothing() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        let keep = ids.new_order(Side::Sell, 4, 12);
        let gone = ids.new_order(Side::Sell, 6, 12);
        book.add_order(keep.clone());
        book.add_order(gone.clone());
        assert!(book.cancel_order(gone.id));
        assert_eq!(book.quantity_for_level(12), 4);
        assert!(!book.cancel_order(gone.id));
        assert!(!book.cancel_order(OrderId(999)));
        assert_eq!(book.quantity_for_level(12), 4);
        assert_eq!(book.get(keep.id), Some(&keep));
    }

    #[test]
    fn remove_order_returns_remaining_quantity() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        let ask = ids.new_order(Side::Sell, 10, 5);
        book.add_order(ask.clone());
        book.add_order(ids.new_order(Side::Buy, 3, 5));
        let removed = book.remove_order(ask.id).expect("resting ask");
        assert_eq!(removed.quantity, 7);
        assert_eq!(removed.price, 5);
        assert!(!book.has_offer());
    }

    #[test]
    fn resting_quantity_per_side() {
        let mut ids = OrderIdGenerator::new();
        let mut book = OrderBook::new();
        book.add_order(ids.new_order(Side::Buy, 3, 4));
        book.add_order(ids.new_order(Side::Buy, 7, 6));
        book.add_order(ids.new_order(Side::Sell, 2, 9));
        assert_eq!(book.resting_quantity(Side::Buy), 10);
        assert_eq!(book.resting_quantity(Side::Sell), 2);
    }
}

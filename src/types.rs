//! Core types and IDs for the exchange.
//!
//! Identifiers are newtype wrappers. Prices and quantities are plain integers:
//! one price unit is one tick.

/// Limit price in ticks. Always positive for a live order.
pub type Price = u64;

/// Quantity in whole shares.
pub type Quantity = u64;

/// Unique order identifier, handed out by an [`OrderIdGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub u64);

/// Participant identifier: registration index within an [`crate::Exchange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TraderId(pub u64);

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Limit order. Only `quantity` changes after construction, and only downwards.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
}

impl Order {
    pub fn new(id: OrderId, side: Side, quantity: Quantity, price: Price) -> Self {
        Self {
            id,
            side,
            quantity,
            price,
        }
    }
}

/// Monotonic order id source. Starts at 1; ids are never reused.
#[derive(Clone, Debug)]
pub struct OrderIdGenerator {
    next: u64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> OrderId {
        let id = OrderId(self.next);
        self.next += 1;
        id
    }

    /// Builds an order with a fresh id.
    pub fn new_order(&mut self, side: Side, quantity: Quantity, price: Price) -> Order {
        Order::new(self.next_id(), side, quantity, price)
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_hands_out_increasing_ids() {
        let mut ids = OrderIdGenerator::new();
        let a = ids.new_order(Side::Buy, 5, 100);
        let b = ids.new_order(Side::Sell, 3, 12);
        assert_ne!(a.id, b.id);
        assert!(a.id < b.id);
        assert_eq!(a.side, Side::Buy);
        assert_eq!(a.quantity, 5);
        assert_eq!(a.price, 100);
    }

    #[test]
    fn independent_generators_do_not_share_sequence() {
        let mut first = OrderIdGenerator::new();
        let mut second = OrderIdGenerator::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), OrderId(1));
    }

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}

//! Executions and per-participant fills.
//!
//! [`Execution`] is emitted by the book for each individual trade.
//! [`Fill`] is one side's view of an execution, delivered to that order's owner.

use crate::types::{Order, OrderId, Price, Quantity, Side};

/// Trade report. Order snapshots are taken before the trade decremented them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Execution {
    /// Side of the aggressor (taker).
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
    pub buy_order: Order,
    pub sell_order: Order,
}

impl Execution {
    /// Snapshot of the order on the given side.
    pub fn order(&self, side: Side) -> &Order {
        match side {
            Side::Buy => &self.buy_order,
            Side::Sell => &self.sell_order,
        }
    }

    /// True if this trade consumed the remainder of the order on `side`.
    pub fn completes(&self, side: Side) -> bool {
        self.order(side).quantity == self.quantity
    }

    /// The fill seen by the owner of the order on `side`.
    pub fn fill(&self, side: Side) -> Fill {
        let order = self.order(side);
        Fill {
            order_id: order.id,
            side,
            quantity: self.quantity,
            price: self.price,
            limit_price: order.price,
            completed: self.completes(side),
        }
    }
}

/// Fill notification for one participant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    pub order_id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    /// Execution price.
    pub price: Price,
    /// The order's own limit price; reservations were taken at this price.
    pub limit_price: Price,
    /// Order fully filled by this trade.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderIdGenerator;

    #[test]
    fn fill_views_carry_each_sides_limit_price() {
        let mut ids = OrderIdGenerator::new();
        let buy = ids.new_order(Side::Buy, 5, 100);
        let sell = ids.new_order(Side::Sell, 8, 90);
        let exec = Execution {
            side: Side::Buy,
            quantity: 5,
            price: 95,
            buy_order: buy.clone(),
            sell_order: sell.clone(),
        };
        let buy_fill = exec.fill(Side::Buy);
        assert_eq!(buy_fill.order_id, buy.id);
        assert_eq!(buy_fill.limit_price, 100);
        assert_eq!(buy_fill.price, 95);
        assert!(buy_fill.completed);

        let sell_fill = exec.fill(Side::Sell);
        assert_eq!(sell_fill.order_id, sell.id);
        assert_eq!(sell_fill.limit_price, 90);
        assert!(!sell_fill.completed);
    }
}

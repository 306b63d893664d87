//! Price-time priority matching with midpoint trade pricing.
//!
//! [`match_order`] runs one order against the book: takes liquidity level by
//! level, oldest order first, and rests the remainder. Each trade prices at the
//! midpoint of the two limit prices (see [`trade_price`]).

use crate::execution::Execution;
use crate::order_book::OrderBook;
use crate::types::{Order, Price, Side};

/// Run matching for one order against the book.
///
/// Returns one execution per resting order touched. Any unfilled quantity is
/// appended to the back of its own price level.
///
/// # Panics
///
/// If `order.price` or `order.quantity` is zero, or an order with the same id
/// is already resting.
pub fn match_order(book: &mut OrderBook, mut order: Order) -> Vec<Execution> {
    assert!(order.price > 0, "order {} has zero price", order.id.0);
    assert!(order.quantity > 0, "order {} has zero quantity", order.id.0);
    assert!(
        !book.contains(order.id),
        "order {} is already resting",
        order.id.0
    );

    let executions = book.take_liquidity(&mut order);
    if order.quantity > 0 {
        book.rest_order(order);
    }
    executions
}

/// Midpoint of two limit prices, rounded down. Never overflows.
pub fn trade_price(aggressor: Price, resting: Price) -> Price {
    aggressor / 2 + resting / 2 + (aggressor % 2 + resting % 2) / 2
}

/// Trade two crossing orders. Both quantities drop by the traded amount; the
/// execution keeps copies of both orders from before the decrement.
pub(crate) fn trade(aggressor: &mut Order, resting: &mut Order) -> Execution {
    debug_assert_ne!(aggressor.side, resting.side);
    let (buy_order, sell_order) = match aggressor.side {
        Side::Buy => {
            debug_assert!(aggressor.price >= resting.price);
            (aggressor.clone(), resting.clone())
        }
        Side::Sell => {
            debug_assert!(aggressor.price <= resting.price);
            (resting.clone(), aggressor.clone())
        }
    };
    let quantity = aggressor.quantity.min(resting.quantity);
    aggressor.quantity -= quantity;
    resting.quantity -= quantity;
    Execution {
        side: aggressor.side,
        quantity,
        price: trade_price(aggressor.price, resting.price),
        buy_order,
        sell_order,
    }
}

//! Text rendering of the book as a price ladder.
//!
//! Read-only: uses only the book's query API.

use crate::order_book::OrderBook;
use crate::types::{Price, Side};

/// One row per price from `max_price` down to `min_price`. Bid quantity sits
/// left of the price, ask quantity right of it; empty levels stay blank.
pub fn render_ladder(book: &OrderBook, min_price: Price, max_price: Price) -> String {
    let mut out = String::new();
    let bid = if book.has_bid() {
        book.best_bid().to_string()
    } else {
        "-".to_string()
    };
    let offer = if book.has_offer() {
        book.best_offer().to_string()
    } else {
        "-".to_string()
    };
    out.push_str(&format!("bid {} / ask {}\n", bid, offer));
    for price in (min_price..=max_price).rev() {
        let quantity = book.quantity_for_level(price);
        let cell = if quantity == 0 {
            String::new()
        } else {
            quantity.to_string()
        };
        let (bids, asks) = match book.side_for_level(price) {
            Side::Buy => (cell.as_str(), ""),
            Side::Sell => ("", cell.as_str()),
        };
        out.push_str(&format!("{:>6} -{:^5}- {:<6}\n", bids, price, asks));
    }
    out
}

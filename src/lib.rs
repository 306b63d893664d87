//! # Tick Exchange
//!
//! Single-instrument exchange simulator: a limit order book with price-time
//! priority and midpoint trade pricing, driven one unit of work per tick by an
//! [`Exchange`] that routes fills back to participant [`Trader`]s.
//!
//! ## Entry point
//!
//! Create an [`Exchange`], register traders with [`Exchange::add_trader`], and
//! call [`Exchange::tick`]. When requests are queued, each tick admits exactly
//! one of them into the book; otherwise each tick lets every trader act.
//!
//! ## Example
//!
//! ```rust
//! use tick_exchange::{Exchange, ManualTrader, MarketConfig, Side, Trader};
//!
//! let config = MarketConfig::default();
//! let mut exchange = Exchange::new(config.clone());
//! let mut buyer = ManualTrader::new(&config);
//! buyer.pen_order(Side::Buy, 10, 10);
//! let mut seller = ManualTrader::new(&config);
//! seller.pen_order(Side::Sell, 10, 10);
//! let b = exchange.add_trader(buyer);
//! let s = exchange.add_trader(seller);
//!
//! exchange.tick(); // traders submit
//! exchange.tick(); // buy rests
//! exchange.tick(); // sell crosses
//! assert_eq!(exchange.trader(b).unwrap().account().money(), 900);
//! assert_eq!(exchange.trader(s).unwrap().account().money(), 1100);
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] can be used on its own with an [`OrderIdGenerator`]:
//!
//! ```rust
//! use tick_exchange::{OrderBook, OrderIdGenerator, Side};
//!
//! let mut ids = OrderIdGenerator::new();
//! let mut book = OrderBook::new();
//! book.add_order(ids.new_order(Side::Sell, 10, 5));
//! let executions = book.add_order(ids.new_order(Side::Buy, 4, 7));
//! assert_eq!(executions[0].price, 6);
//! assert_eq!(book.quantity_for_level(5), 6);
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod exchange;
pub mod execution;
pub mod matching;
pub mod order_book;
pub mod order_stream;
pub mod simulation;
pub mod trader;
pub mod traders;
pub mod types;

pub use config::{MarketConfig, SimConfig};
pub use error::{Result, SimError};
pub use events::{EventSink, ExchangeEvent, InMemoryEventSink, LogEventSink};
pub use exchange::Exchange;
pub use execution::{Execution, Fill};
pub use matching::{match_order, trade_price};
pub use order_book::{OrderBook, NO_BID, NO_OFFER};
pub use order_stream::{replay_into_book, Generator, GeneratorConfig};
pub use simulation::{Simulation, TraderSummary};
pub use trader::{Account, Market, Trader};
pub use traders::{DealerTrader, ManualTrader, RandomMarketOrderTrader, RandomTrader, SpreadTrader};
pub use types::{Order, OrderId, OrderIdGenerator, Price, Quantity, Side, TraderId};

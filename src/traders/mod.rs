//! Participant policies.
//!
//! Each policy implements [`crate::Trader`] over its own [`crate::Account`].

mod dealer;
mod manual;
mod random;
mod spread;

pub use dealer::DealerTrader;
pub use manual::ManualTrader;
pub use random::{RandomMarketOrderTrader, RandomTrader};
pub use spread::SpreadTrader;

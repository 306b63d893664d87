//! Error types for the simulator.
//!
//! Book-level negative outcomes (cancel not found, empty ladder) are not
//! errors; they return `false`, `0` or a sentinel price. What lands here is
//! participant capacity checks and ambient failures such as configuration.

use crate::types::{OrderId, TraderId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Insufficient free money: required {required}, available {available}")]
    InsufficientMoney { required: i64, available: i64 },

    #[error("Insufficient free shares: required {required}, available {available}")]
    InsufficientShares { required: i64, available: i64 },

    #[error("Unknown trader: {0:?}")]
    UnknownTrader(TraderId),

    #[error("Duplicate order id: {0:?}")]
    DuplicateOrder(OrderId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

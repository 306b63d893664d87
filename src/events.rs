//! Journal of exchange activity.
//!
//! The exchange emits one [`ExchangeEvent`] per admission, trade and cancel
//! outcome, in the same order it notifies participants. Sink: the log (one JSON
//! line per event) or in-memory for tests.

use crate::execution::Execution;
use crate::types::{Order, OrderId, TraderId};
use log::debug;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Single journal record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExchangeEvent {
    /// Order taken off the queue and about to hit the book.
    Accepted {
        tick: u64,
        trader: TraderId,
        order: Order,
    },
    /// One trade between a buy and a sell.
    Traded { tick: u64, execution: Execution },
    /// Resting order removed on its owner's request; `order` holds the unfilled remainder.
    Cancelled {
        tick: u64,
        trader: TraderId,
        order: Order,
    },
    /// Cancel for an order that is not live or not owned by the requester.
    CancelRejected {
        tick: u64,
        trader: TraderId,
        order_id: OrderId,
    },
}

/// Sink for exchange events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ExchangeEvent);
}

/// Writes one JSON line per event at debug level.
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: &ExchangeEvent) {
        if let Ok(line) = serde_json::to_string(event) {
            debug!("{}", line);
        }
    }
}

/// In-memory sink that stores events for tests. Clone shares the same backing buffer.
#[derive(Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<ExchangeEvent>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExchangeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl EventSink for InMemoryEventSink {
    fn emit(&self, event: &ExchangeEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

//! # Subscriptions
//!
//! The receiving end of the bus. A subscriber that falls more than the
//! channel capacity behind loses the oldest events; for origin logs that is
//! a dropped delivery, which the destination's round guard already absorbs.

use crate::events::{EventFilter, OracleEvent};
use crate::publisher::SharedStats;
use thiserror::Error;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was dropped.
    #[error("Event bus closed")]
    Closed,
}

/// A filtered view of the bus. Dropping it unsubscribes.
pub struct Subscription {
    receiver: Receiver<OracleEvent>,
    filter: EventFilter,
    stats: SharedStats,
}

impl Subscription {
    pub(crate) fn new(
        receiver: Receiver<OracleEvent>,
        filter: EventFilter,
        stats: SharedStats,
    ) -> Self {
        Self {
            receiver,
            filter,
            stats,
        }
    }

    /// Waits for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<OracleEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// The next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<OracleEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// What this subscription lets through.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    fn record_lag(&self, skipped: u64) {
        warn!(skipped, topics = ?self.filter.topics, "Subscriber lagged, events lost");
        self.stats.lock().lagged += skipped;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut stats = self.stats.lock();
        stats.subscriptions = stats.subscriptions.saturating_sub(1);
    }
}

//! # Event Bus
//!
//! Broadcast transport between the simulated chains and the relay
//! infrastructure. Sending never blocks and never fails: an event nobody
//! listens for is counted as undelivered and dropped, the way a log with no
//! subscriber simply goes unobserved.

use crate::events::{EventFilter, EventTopic, OracleEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Delivery counters of one bus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Events sent, by topic.
    pub published: HashMap<EventTopic, u64>,
    /// Events sent while nobody was subscribed.
    pub undelivered: u64,
    /// Events skipped by subscribers that fell behind.
    pub lagged: u64,
    /// Live subscriptions.
    pub subscriptions: usize,
}

impl BusStats {
    /// Events sent on every topic.
    #[must_use]
    pub fn total_published(&self) -> u64 {
        self.published.values().sum()
    }

    /// Events sent on one topic.
    #[must_use]
    pub fn published_on(&self, topic: EventTopic) -> u64 {
        self.published.get(&topic).copied().unwrap_or(0)
    }
}

/// Counters shared between the bus and its subscriptions.
pub(crate) type SharedStats = Arc<Mutex<BusStats>>;

/// In-process event bus.
///
/// Every subscriber receives every event and filters on its own side, so a
/// slow handler lags instead of holding back the chains.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<OracleEvent>,
    stats: SharedStats,
    capacity: usize,
}

impl InMemoryEventBus {
    /// A bus buffering `DEFAULT_CHANNEL_CAPACITY` events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// A bus buffering `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            stats: SharedStats::default(),
            capacity,
        }
    }

    /// Starts receiving events that match `filter`. Only events sent after
    /// this call are seen.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        self.stats.lock().subscriptions += 1;
        debug!(topics = ?filter.topics, chains = ?filter.chain_ids, "Subscribed to bus");
        Subscription::new(receiver, filter, Arc::clone(&self.stats))
    }

    /// Broadcasts `event` and returns how many subscribers it reached.
    ///
    /// Synchronous so that contract outbound ports can emit from inside a
    /// call.
    pub fn send(&self, event: OracleEvent) -> usize {
        let topic = event.topic();
        let chain_id = event.chain_id();

        let mut stats = self.stats.lock();
        *stats.published.entry(topic).or_insert(0) += 1;

        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(?topic, chain_id, receivers, "Event sent");
                receivers
            }
            Err(_) => {
                stats.undelivered += 1;
                debug!(?topic, chain_id, "Event undelivered (no subscribers)");
                0
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the delivery counters.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        self.stats.lock().clone()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

//! # Oracle Events
//!
//! Messages the simulated chains and the off-chain infrastructure exchange.
//! Contracts never see these types; the runtime translates between bus
//! events and contract calls.

use serde::{Deserialize, Serialize};
use shared_types::callback::CallbackRequest;
use shared_types::entities::{LogRecord, RoundData};
use shared_types::value_objects::Address;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OracleEvent {
    // =========================================================================
    // ORIGIN CHAIN
    // =========================================================================
    /// A log recorded on a watched chain.
    /// Source: origin chain | Target: reactive dispatch
    OriginLog(LogRecord),

    // =========================================================================
    // REACTIVE NETWORK
    // =========================================================================
    /// A relay emitted a `Callback` request.
    /// Source: reactive dispatch | Target: callback delivery
    CallbackRequested {
        /// Identity of the ReactVM that emitted the request.
        rvm_id: Address,
        /// The request exactly as emitted (identity slot still zero).
        request: CallbackRequest,
    },

    // =========================================================================
    // DESTINATION CHAIN
    // =========================================================================
    /// The destination proxy accepted an update.
    PriceSynced {
        /// Destination chain.
        chain_id: u64,
        /// Proxy that accepted the round.
        contract: Address,
        /// The accepted round.
        round: RoundData,
    },

    /// A delivered callback reverted or was never executed.
    CallbackRejected {
        /// Destination chain.
        chain_id: u64,
        /// Target contract.
        contract: Address,
        /// Round carried by the payload, when it decoded.
        round_id: Option<u64>,
        /// Revert reason.
        reason: String,
    },
}

impl OracleEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::OriginLog(_) => EventTopic::OriginLogs,
            Self::CallbackRequested { .. } => EventTopic::Callbacks,
            Self::PriceSynced { .. } | Self::CallbackRejected { .. } => EventTopic::Destination,
        }
    }

    /// Chain the event concerns: where a log was recorded, or where a
    /// callback is headed.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::OriginLog(log) => log.chain_id,
            Self::CallbackRequested { request, .. } => request.chain_id,
            Self::PriceSynced { chain_id, .. } | Self::CallbackRejected { chain_id, .. } => {
                *chain_id
            }
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Raw logs from watched chains.
    OriginLogs,
    /// Callback requests from the reactive network.
    Callbacks,
    /// Destination outcomes.
    Destination,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Chains to include. Empty means all chains.
    pub chain_ids: Vec<u64>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            chain_ids: Vec::new(),
        }
    }

    /// Restrict the filter to events concerning the given chains.
    #[must_use]
    pub fn on_chains(mut self, chain_ids: Vec<u64>) -> Self {
        self.chain_ids = chain_ids;
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &OracleEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let chain_match = self.chain_ids.is_empty() || self.chain_ids.contains(&event.chain_id());

        topic_match && chain_match
    }
}

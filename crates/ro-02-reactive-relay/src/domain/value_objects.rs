//! # Value Objects
//!
//! Validation outcomes and the subscription filter.

use serde::{Deserialize, Serialize};
use shared_types::constants::REACTIVE_IGNORE;
use shared_types::entities::LogRecord;
use shared_types::value_objects::{Address, Hash};
use std::fmt;

/// Why a delivered log was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Recorded on a chain other than the configured origin.
    WrongChain,
    /// Emitted by a contract other than the configured origin feed.
    WrongContract,
    /// Not an `AnswerUpdated` log.
    WrongTopic,
    /// Data section shorter than three ABI words.
    PayloadTooShort,
    /// Data did not decode into `(int256, uint256, uint256)` within range.
    Malformed,
}

impl RejectReason {
    /// Every reason, in validation order.
    pub const ALL: [Self; 5] = [
        Self::WrongChain,
        Self::WrongContract,
        Self::WrongTopic,
        Self::PayloadTooShort,
        Self::Malformed,
    ];
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WrongChain => "wrong_chain",
            Self::WrongContract => "wrong_contract",
            Self::WrongTopic => "wrong_topic",
            Self::PayloadTooShort => "payload_too_short",
            Self::Malformed => "malformed",
        };
        f.write_str(name)
    }
}

/// An origin update that passed every check. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEvent {
    /// New answer.
    pub answer: i128,
    /// Origin round id.
    pub round_id: u64,
    /// Origin update time.
    pub updated_at: u64,
    /// Chain the log came from.
    pub origin_chain_id: u64,
    /// Contract that emitted it.
    pub origin_contract: Address,
    /// Its event signature hash.
    pub topic_0: Hash,
}

/// Result of validating one delivered log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Forward it.
    Accepted(ValidatedEvent),
    /// Drop it without reverting.
    Rejected(RejectReason),
}

impl ValidationOutcome {
    /// True for `Accepted`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// A subscription registered with the reactive system contract.
///
/// A topic equal to `REACTIVE_IGNORE` matches any value, including a
/// missing topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionFilter {
    /// Watched chain.
    pub chain_id: u64,
    /// Watched contract.
    pub contract: Address,
    /// Topic 0 to 3, `REACTIVE_IGNORE` for any.
    pub topics: [Hash; 4],
}

impl SubscriptionFilter {
    /// Filter on one event signature from one contract.
    #[must_use]
    pub fn for_event(chain_id: u64, contract: Address, topic_0: Hash) -> Self {
        Self {
            chain_id,
            contract,
            topics: [topic_0, REACTIVE_IGNORE, REACTIVE_IGNORE, REACTIVE_IGNORE],
        }
    }

    /// Whether the dispatch infrastructure would deliver `log`.
    #[must_use]
    pub fn matches(&self, log: &LogRecord) -> bool {
        if log.chain_id != self.chain_id || log.contract != self.contract {
            return false;
        }
        self.topics.iter().enumerate().all(|(i, expected)| {
            *expected == REACTIVE_IGNORE || log.topics.get(i) == Some(expected)
        })
    }
}

//! # Domain Entities
//!
//! The append-only round ledger behind the origin feed.

use super::errors::OriginFeedError;
use super::invariants::{invariant_contiguous, invariant_next_round_id, invariant_self_answered};
use serde::{Deserialize, Serialize};
use shared_types::constants::{FEED_DECIMALS, FEED_VERSION};
use shared_types::entities::RoundData;

/// Default human-readable name of the origin feed.
pub const DEFAULT_DESCRIPTION: &str = "Mock BTC/USD";

/// Immutable feed parameters fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginFeedConfig {
    /// Returned by `description()`.
    pub description: String,
    /// Returned by `decimals()`.
    pub decimals: u8,
    /// Returned by `version()`.
    pub version: u64,
}

impl Default for OriginFeedConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            decimals: FEED_DECIMALS,
            version: FEED_VERSION,
        }
    }
}

/// Append-only history of rounds.
///
/// Round `n` lives at index `n - 1`, so ids are dense from 1 and the last
/// element is always the latest round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoundLedger {
    rounds: Vec<RoundData>,
    /// Construction block time; the timeline starts here.
    deployed_at: u64,
}

impl RoundLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(deployed_at: u64) -> Self {
        Self {
            rounds: Vec::new(),
            deployed_at,
        }
    }

    /// Construction block time.
    #[must_use]
    pub fn deployed_at(&self) -> u64 {
        self.deployed_at
    }

    /// Most recent round, or the zero placeholder stamped with the
    /// construction time.
    #[must_use]
    pub fn latest(&self) -> RoundData {
        self.rounds
            .last()
            .copied()
            .unwrap_or_else(|| RoundData::empty(self.deployed_at))
    }

    /// A specific round, if written.
    #[must_use]
    pub fn get(&self, round_id: u64) -> Option<RoundData> {
        let index = usize::try_from(round_id.checked_sub(1)?).ok()?;
        self.rounds.get(index).copied()
    }

    /// Appends the next round and returns it.
    pub fn append(&mut self, answer: i128, updated_at: u64) -> Result<RoundData, OriginFeedError> {
        let previous = self.rounds.last();
        let latest_id = previous.map_or(0, |r| r.round_id);
        let round_id = invariant_next_round_id(latest_id)?;
        let started_at = previous.map_or(self.deployed_at, |r| r.updated_at);

        let round = RoundData {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round: round_id,
        };
        debug_assert!(invariant_self_answered(&round));
        debug_assert!(previous.map_or(true, |prev| invariant_contiguous(prev, &round)));
        self.rounds.push(round);
        Ok(round)
    }

    /// Number of rounds written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True before the first round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// All rounds, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[RoundData] {
        &self.rounds
    }
}

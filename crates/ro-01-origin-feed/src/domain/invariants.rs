//! # Domain Invariants
//!
//! Business rules of the round ledger.

use super::errors::OriginFeedError;
use shared_types::entities::RoundData;

/// Invariant: Sequential round ids.
///
/// Every submission advances the round id by exactly one.
pub fn invariant_next_round_id(latest_round_id: u64) -> Result<u64, OriginFeedError> {
    latest_round_id
        .checked_add(1)
        .ok_or(OriginFeedError::RoundOverflow(latest_round_id))
}

/// Invariant: Contiguous timeline.
///
/// A round starts exactly when its predecessor was updated.
pub fn invariant_contiguous(previous: &RoundData, next: &RoundData) -> bool {
    previous.round_id.checked_add(1) == Some(next.round_id)
        && next.started_at == previous.updated_at
}

/// Invariant: Self-answered rounds.
///
/// There is no multi-round aggregation; every round answers itself.
pub fn invariant_self_answered(round: &RoundData) -> bool {
    round.answered_in_round == round.round_id
}

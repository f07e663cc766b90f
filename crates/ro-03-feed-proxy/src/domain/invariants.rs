//! # Domain Invariants
//!
//! The monotonic acceptance rule of the mirror.

use shared_types::entities::RoundData;

/// Invariant: Monotonic rounds.
///
/// An update is newer when its round id is higher, or when it repeats the
/// current round id with a strictly later `updated_at`. Everything else,
/// including an exact duplicate, is stale. Round 0 is the placeholder and
/// never newer.
#[must_use]
pub fn invariant_is_newer(latest: &RoundData, incoming: &RoundData) -> bool {
    if incoming.round_id == 0 {
        return false;
    }
    incoming.round_id > latest.round_id
        || (incoming.round_id == latest.round_id && incoming.updated_at > latest.updated_at)
}

//! # Domain Errors
//!
//! Error types for the origin price ledger.

use thiserror::Error;

/// Origin feed error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginFeedError {
    /// The round was never written. Round 0 is never written.
    #[error("Round not found")]
    RoundNotFound(u64),

    /// The round counter cannot advance.
    #[error("Round id overflow after round {0}")]
    RoundOverflow(u64),
}

//! # Domain Errors
//!
//! Every failure reverts: nothing is written and no event is emitted.

use shared_types::errors::AbiError;
use shared_types::value_objects::Address;
use std::fmt;
use thiserror::Error;

/// Which authorization check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The transaction did not come from the callback proxy.
    NotCallbackProxy {
        /// The rejected caller.
        caller: Address,
    },
    /// The callback proxy attested a different relay.
    WrongReactiveVm {
        /// Configured relay identity.
        expected: Address,
        /// Identity found in the payload.
        found: Address,
    },
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCallbackProxy { .. } => f.write_str("FeedProxy: not Reactive proxy"),
            Self::WrongReactiveVm { .. } => f.write_str("FeedProxy: invalid RVM ID"),
        }
    }
}

/// Feed proxy error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// Sender or attested relay identity is not the configured one.
    #[error("{0}")]
    Unauthorized(AuthFailure),

    /// The payload was built for another protocol version.
    #[error("FeedProxy: invalid domain")]
    InvalidDomain,

    /// The update is not newer than the stored round.
    #[error("FeedProxy: stale round {incoming_round} (latest {latest_round})")]
    StaleRound {
        /// Round carried by the rejected update.
        incoming_round: u64,
        /// Round currently stored.
        latest_round: u64,
    },

    /// Only the current round is retrievable.
    #[error("FeedProxy: round not found")]
    RoundNotFound(u64),

    /// Deployment parameters are unusable.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// Raw calldata did not decode as `updatePrice`.
    #[error("FeedProxy: malformed calldata: {0}")]
    MalformedCalldata(#[from] AbiError),
}

impl ProxyError {
    /// True for authorization failures.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

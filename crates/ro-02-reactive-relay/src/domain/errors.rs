//! # Domain Errors
//!
//! Loud failures of the reactive relay. Data that fails validation is not an
//! error: it is a silent `ValidationOutcome::Rejected`.

use shared_types::value_objects::Address;
use thiserror::Error;

/// Reactive relay error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// `react` was invoked outside the ReactVM.
    #[error("ReactiveMirror: not ReactVM")]
    NotReactiveVm,

    /// `pay` was invoked by someone other than the system contract.
    #[error("ReactiveMirror: not System Contract")]
    NotSystemContract {
        /// The rejected caller.
        caller: Address,
    },

    /// Deployment parameters are unusable.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// The system contract refused a subscription.
    #[error("Subscription failed: {0}")]
    SubscriptionFailed(String),
}

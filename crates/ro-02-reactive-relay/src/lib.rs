//! # RO-02 Reactive Relay
//!
//! Watches the origin feed's `AnswerUpdated` logs and turns each genuine
//! one into an authenticated callback for the destination feed proxy.
//!
//! **Component:** 2 of 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Trust Model
//!
//! | Check | Failure |
//! |-------|---------|
//! | Caller is the ReactVM | `RelayError::NotReactiveVm` (revert) |
//! | Chain, contract, topic, length, decode | `ValidationOutcome::Rejected` (silent) |
//! | `pay` caller is the system contract | `RelayError::NotSystemContract` (revert) |
//!
//! The callback payload leaves the caller-identity slot zeroed. The callback
//! infrastructure writes the relay's RVM id there, and the feed proxy checks
//! it; the relay cannot forge it.
//!
//! ## Module Structure
//!
//! ```text
//! ro-02-reactive-relay/
//! ├── domain/     # RelayConfig, SubscriptionFilter, validation, callback builder
//! ├── ports/      # ReactiveRelayApi, SubscriptionService, CallbackEmitter
//! └── service.rs  # ReactiveRelay
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    build_callback, validate_log, RejectReason, RelayConfig, RelayError, RelayStats,
    SubscriptionFilter, ValidatedEvent, ValidationOutcome,
};
pub use ports::{
    CallbackEmitter, MockCallbackEmitter, MockSubscriptionService, ReactiveRelayApi,
    SubscriptionService,
};
pub use service::ReactiveRelay;

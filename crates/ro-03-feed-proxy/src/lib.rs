//! # RO-03 Feed Proxy
//!
//! Chainlink-compatible mirror of the origin feed on the destination chain.
//!
//! **Component:** 3 of 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Acceptance Rules
//!
//! | Order | Check | Failure |
//! |-------|-------|---------|
//! | 1 | `msg.sender == callback_proxy` | `Unauthorized` |
//! | 2 | attested `rvm_id == reactive_vm_id` | `Unauthorized` |
//! | 3 | `domain_separator == keccak256("REACTIVE_ORACLE_V1")` | `InvalidDomain` |
//! | 4 | `invariant_is_newer(latest, incoming)` | `StaleRound` |
//!
//! Every failure leaves the stored round untouched.
//!
//! ## Module Structure
//!
//! ```text
//! ro-03-feed-proxy/
//! ├── domain/     # ProxyConfig, ProxyState, errors, monotonic guard
//! ├── ports/      # FeedProxyApi
//! ├── events.rs   # PriceSynced
//! └── service.rs  # FeedProxy
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    invariant_is_newer, AuthFailure, ProxyConfig, ProxyError, ProxyState, DEFAULT_DESCRIPTION,
};
pub use events::PriceSynced;
pub use ports::FeedProxyApi;
pub use service::FeedProxy;

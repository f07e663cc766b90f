//! # RO-01 Origin Feed
//!
//! Round-versioned price ledger on the origin chain.
//!
//! **Component:** 1 of 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A Chainlink-compatible aggregator whose every update writes a new round
//! and emits `AnswerUpdated`. The reactive relay watches that event.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Round ids increase by exactly one | `invariant_next_round_id()` |
//! | `started_at(n) == updated_at(n - 1)` | `RoundLedger::append()` |
//! | Round 0 is never retrievable | `RoundLedger::get()` |
//!
//! ## Module Structure
//!
//! ```text
//! ro-01-origin-feed/
//! ├── domain/     # RoundLedger, config, errors, invariants
//! ├── ports/      # OriginFeedApi
//! ├── events.rs   # AnswerUpdated and its log encoding
//! └── service.rs  # OriginFeed
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    invariant_contiguous, invariant_next_round_id, invariant_self_answered, OriginFeedConfig,
    OriginFeedError, RoundLedger, DEFAULT_DESCRIPTION,
};
pub use events::AnswerUpdated;
pub use ports::OriginFeedApi;
pub use service::OriginFeed;

//! # Shared Bus - Event Bus between Chains and Infrastructure
//!
//! The origin chain, the reactive dispatch, the callback delivery and the
//! destination chain never call each other. Everything moves over this bus.
//!
//! ```text
//! ┌──────────────┐  OriginLog   ┌──────────────┐  CallbackRequested  ┌──────────────┐
//! │ Origin chain │ ───────────▶ │   Dispatch   │ ──────────────────▶ │   Delivery   │
//! └──────────────┘              │  (ReactVM)   │                     │ (dest chain) │
//!                               └──────────────┘                     └──────┬───────┘
//!                                                   PriceSynced /           │
//!                                                   CallbackRejected ◀──────┘
//! ```
//!
//! Delivery is at-most-once per subscriber: a lagging subscriber loses
//! events instead of blocking the publisher.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, OracleEvent};
pub use publisher::{BusStats, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

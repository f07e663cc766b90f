//! # Reactive-Oracle Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Synchronous three-contract pipeline
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── spoofed_origin.rs      # Forged AnswerUpdated logs
//! │   ├── callback_replay.rs     # Cross-protocol and cross-proxy replay
//! │   ├── unauthorized_callers.rs
//! │   └── delivery_ordering.rs   # Reordered and duplicated callbacks
//! │
//! └── integration/      # End-to-end flows
//!     ├── contract_pipeline.rs   # Origin → relay → proxy, no bus
//!     └── runtime_flows.rs       # Same flow over the bus and handlers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ro-tests
//!
//! # By category
//! cargo test -p ro-tests integration::
//! cargo test -p ro-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p ro-tests
//! ```

pub mod exploits;
pub mod integration;

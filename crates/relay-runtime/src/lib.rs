//! # Relay Runtime Library
//!
//! Wires the origin feed, the reactive relay and the feed proxy to in-process
//! stand-ins for the reactive network's dispatch and the destination's
//! callback proxy. The main entry point is the `main.rs` binary; the library
//! exposes the modules for testing.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: contracts never call each other;
//!   logs and callbacks travel over the event bus
//! - **Hexagonal Architecture**: contract crates define ports, adapters here
//!   implement them
//! - **At-least-once delivery**: callbacks may be duplicated or reordered;
//!   the proxy's round guard is the only ordering enforcement
//!
//! ## Module Structure
//!
//! ```text
//! relay-runtime/
//! ├── config.rs     # RuntimeConfig, env overrides, validation
//! ├── chain.rs      # SimulatedChain block clocks
//! ├── adapters/     # DispatchService, CallbackDispatcher, CallbackDeliveryService
//! ├── handlers/     # Bus loops driving the adapters
//! └── runtime.rs    # OracleRuntime: deployment, lifecycle, queries
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod chain;
pub mod config;
pub mod handlers;
pub mod runtime;

pub use chain::{SharedChain, SimulatedChain};
pub use config::{ConfigError, DeliveryConfig, RuntimeConfig};
pub use runtime::{OracleRuntime, RuntimeError, RuntimeStatus};

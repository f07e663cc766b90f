//! # Adapter Implementations
//!
//! In-process stand-ins for the infrastructure around the contracts. Each
//! adapter implements an outbound port of a contract crate, or drives one
//! of its inbound ports from bus events.
//!
//! ```text
//! OriginLog ──→ DispatchService ──react──→ ReactiveRelay (ReactVM copy)
//!                                                │ emit
//!                                                ↓
//!                                        CallbackDispatcher
//!                                                │ CallbackRequested
//!                                                ↓
//!                                   CallbackDeliveryService ──→ FeedProxy
//!                                                │
//!                                    PriceSynced / CallbackRejected
//! ```

pub mod delivery;
pub mod dispatch;

pub use delivery::{CallbackDeliveryService, DeliveryOutcome, DeliveryStats, SharedProxy};
pub use dispatch::{CallbackDispatcher, DispatchService, DispatchStats, SharedRelay};

//! # Driving Ports (API - Inbound)
//!
//! Entry points the reactive network invokes on the relay.

use crate::domain::{RelayError, RelayStats, ValidationOutcome};
use shared_types::entities::{CallContext, LogRecord};
use shared_types::value_objects::U256;

/// Reactive relay API.
pub trait ReactiveRelayApi {
    /// Handles one delivered log.
    ///
    /// Fails only when called outside the ReactVM. Logs that fail validation
    /// return `Ok(())` and emit nothing.
    fn react(&mut self, ctx: &CallContext, log: &LogRecord) -> Result<(), RelayError>;

    /// Pure validation of a log, without emitting.
    fn validate(&self, log: &LogRecord) -> ValidationOutcome;

    /// Settles callback debt. System contract only.
    fn pay(&mut self, ctx: &CallContext) -> Result<(), RelayError>;

    /// Unrestricted top-up.
    fn receive(&mut self, ctx: &CallContext);

    /// Native balance held by the relay.
    fn balance(&self) -> U256;

    /// Diagnostics counters.
    fn stats(&self) -> RelayStats;
}

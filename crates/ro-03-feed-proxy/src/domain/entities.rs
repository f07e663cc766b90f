//! # Domain Entities
//!
//! Deployment parameters and lifecycle state of the proxy.

use super::errors::ProxyError;
use serde::{Deserialize, Serialize};
use shared_types::constants::{CALLBACK_PROXY, FEED_DECIMALS, FEED_VERSION};
use shared_types::value_objects::Address;

/// Default human-readable name of the mirror.
pub const DEFAULT_DESCRIPTION: &str = "BTC/USD (Reactive Mirror)";

/// Immutable proxy parameters fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// The only relay identity whose callbacks are accepted.
    pub reactive_vm_id: Address,
    /// The only account allowed to deliver callbacks and to `pay`.
    pub callback_proxy: Address,
    /// Returned by `description()`.
    pub description: String,
    /// Returned by `decimals()`.
    pub decimals: u8,
    /// Returned by `version()`.
    pub version: u64,
}

impl ProxyConfig {
    /// Parameters for the default destination chain.
    #[must_use]
    pub fn new(reactive_vm_id: Address) -> Self {
        Self {
            reactive_vm_id,
            callback_proxy: CALLBACK_PROXY,
            description: DEFAULT_DESCRIPTION.to_string(),
            decimals: FEED_DECIMALS,
            version: FEED_VERSION,
        }
    }

    /// Rejects a zero relay identity.
    pub fn validate(&self) -> Result<(), ProxyError> {
        if self.reactive_vm_id.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "FeedProxy: invalid RVM ID".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lifecycle of the mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyState {
    /// No update accepted yet; reads return the placeholder.
    Uninitialized,
    /// At least one update accepted.
    Live,
}

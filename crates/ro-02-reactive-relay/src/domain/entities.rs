//! # Domain Entities
//!
//! Relay deployment parameters and diagnostics counters.

use super::errors::RelayError;
use super::value_objects::RejectReason;
use serde::{Deserialize, Serialize};
use shared_types::constants::{
    CALLBACK_GAS_LIMIT, DESTINATION_CHAIN_ID, MIN_CALLBACK_GAS_LIMIT, ORIGIN_CHAIN_ID,
    SYSTEM_CONTRACT,
};
use shared_types::value_objects::Address;
use std::collections::HashMap;

/// Immutable relay parameters fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Chain the origin feed lives on.
    pub origin_chain_id: u64,
    /// Chain the feed proxy lives on.
    pub destination_chain_id: u64,
    /// The watched origin feed.
    pub origin_feed: Address,
    /// The feed proxy receiving callbacks.
    pub destination_contract: Address,
    /// Reactive system contract; the only account allowed to call `pay`.
    pub system_contract: Address,
    /// Gas budget requested for every callback.
    pub callback_gas_limit: u64,
}

impl RelayConfig {
    /// Parameters for the default chain pair.
    #[must_use]
    pub fn new(origin_feed: Address, destination_contract: Address) -> Self {
        Self {
            origin_chain_id: ORIGIN_CHAIN_ID,
            destination_chain_id: DESTINATION_CHAIN_ID,
            origin_feed,
            destination_contract,
            system_contract: SYSTEM_CONTRACT,
            callback_gas_limit: CALLBACK_GAS_LIMIT,
        }
    }

    /// Checks the parameters, substituting the default system contract for
    /// a zero address.
    pub fn validate(mut self) -> Result<Self, RelayError> {
        if self.origin_feed.is_zero() {
            return Err(RelayError::InvalidConfiguration(
                "Invalid origin feed".to_string(),
            ));
        }
        if self.destination_contract.is_zero() {
            return Err(RelayError::InvalidConfiguration(
                "Invalid dest contract".to_string(),
            ));
        }
        if self.callback_gas_limit < MIN_CALLBACK_GAS_LIMIT {
            return Err(RelayError::InvalidConfiguration(format!(
                "Callback gas limit {} below minimum {}",
                self.callback_gas_limit, MIN_CALLBACK_GAS_LIMIT
            )));
        }
        if self.system_contract.is_zero() {
            self.system_contract = SYSTEM_CONTRACT;
        }
        Ok(self)
    }
}

/// Diagnostics counters. Not protocol state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayStats {
    /// Logs delivered to `react`.
    pub logs_received: u64,
    /// Callback requests emitted.
    pub callbacks_emitted: u64,
    /// Silently dropped logs by reason.
    pub rejected: HashMap<RejectReason, u64>,
    /// Calls refused for lack of authority.
    pub unauthorized_calls: u64,
}

impl RelayStats {
    /// Total silently dropped logs.
    #[must_use]
    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }

    /// Dropped logs for one reason.
    #[must_use]
    pub fn rejected_for(&self, reason: RejectReason) -> u64 {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }
}

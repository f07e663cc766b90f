//! # Callback Delivery Adapter
//!
//! Plays the destination chain's callback proxy. For each callback request
//! addressed to the configured feed proxy it overwrites the reserved
//! identity slot with the emitting relay's RVM id and executes the payload
//! as the callback proxy. Execution is at-least-once: with
//! `duplicate_deliveries` every request runs twice.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use ro_03_feed_proxy::{FeedProxy, FeedProxyApi};
use shared_bus::{InMemoryEventBus, OracleEvent};
use shared_types::callback::{CallbackRequest, UpdatePriceCall};
use shared_types::constants::MIN_CALLBACK_GAS_LIMIT;
use shared_types::entities::{CallContext, RoundData};
use shared_types::feed::AggregatorV3;
use shared_types::value_objects::Address;

use crate::chain::SharedChain;
use crate::config::DeliveryConfig;

/// The feed proxy shared between the runtime and the delivery service.
pub type SharedProxy = Arc<Mutex<FeedProxy>>;

/// Result of one execution attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The proxy accepted the round.
    Synced(RoundData),
    /// The proxy reverted.
    Reverted(String),
    /// The request was never executed.
    Refused(String),
}

/// Delivery counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Requests addressed to this proxy.
    pub requests: u64,
    /// Requests for another chain or contract.
    pub ignored: u64,
    /// Payload executions.
    pub executions: u64,
    /// Executions the proxy accepted.
    pub synced: u64,
    /// Executions the proxy reverted.
    pub reverted: u64,
    /// Requests refused before execution.
    pub refused: u64,
}

/// Callback proxy of the destination chain.
pub struct CallbackDeliveryService {
    chain: SharedChain,
    proxy_address: Address,
    callback_proxy: Address,
    proxy: SharedProxy,
    options: DeliveryConfig,
    bus: Arc<InMemoryEventBus>,
    stats: RwLock<DeliveryStats>,
}

impl CallbackDeliveryService {
    /// A delivery service for the proxy deployed at `proxy_address`.
    pub fn new(
        chain: SharedChain,
        proxy_address: Address,
        callback_proxy: Address,
        proxy: SharedProxy,
        options: DeliveryConfig,
        bus: Arc<InMemoryEventBus>,
    ) -> Self {
        Self {
            chain,
            proxy_address,
            callback_proxy,
            proxy,
            options,
            bus,
            stats: RwLock::new(DeliveryStats::default()),
        }
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> DeliveryStats {
        self.stats.read().clone()
    }

    /// Executes `request` on behalf of ReactVM `rvm_id`.
    ///
    /// Returns one outcome per execution attempt; empty when the request is
    /// addressed elsewhere.
    pub fn deliver(&self, rvm_id: Address, mut request: CallbackRequest) -> Vec<DeliveryOutcome> {
        let chain_id = self.chain.lock().chain_id();
        if request.chain_id != chain_id || request.contract != self.proxy_address {
            debug!(
                chain_id = request.chain_id,
                contract = %request.contract,
                "Callback addressed elsewhere"
            );
            self.stats.write().ignored += 1;
            return Vec::new();
        }
        self.stats.write().requests += 1;

        let round_id = UpdatePriceCall::decode(request.payload.as_slice())
            .ok()
            .map(|call| call.round_id);

        if request.gas_limit < MIN_CALLBACK_GAS_LIMIT {
            return vec![self.refuse(round_id, "callback gas limit below minimum")];
        }
        if !request.inject_identity(rvm_id) {
            return vec![self.refuse(round_id, "payload too short for the identity slot")];
        }
        if self.options.require_funding && self.proxy.lock().balance().is_zero() {
            return vec![self.refuse(round_id, "callback contract not funded")];
        }

        let attempts = if self.options.duplicate_deliveries { 2 } else { 1 };
        (0..attempts)
            .map(|_| self.execute(round_id, &request))
            .collect()
    }

    fn execute(&self, round_id: Option<u64>, request: &CallbackRequest) -> DeliveryOutcome {
        let block = self.chain.lock().next_block();
        let ctx = CallContext::new(self.callback_proxy, block);
        self.stats.write().executions += 1;

        let result = {
            let mut proxy = self.proxy.lock();
            proxy
                .handle_callback(&ctx, request.payload.as_slice())
                .map(|_| proxy.latest_round_data())
        };

        match result {
            Ok(round) => {
                info!(
                    round_id = round.round_id,
                    answer = round.answer,
                    block = block.number,
                    "Callback executed"
                );
                self.stats.write().synced += 1;
                self.bus.send(OracleEvent::PriceSynced {
                    chain_id: block.chain_id,
                    contract: self.proxy_address,
                    round,
                });
                DeliveryOutcome::Synced(round)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(round_id = ?round_id, reason = %reason, "Callback reverted");
                self.stats.write().reverted += 1;
                self.publish_rejection(round_id, reason.clone());
                DeliveryOutcome::Reverted(reason)
            }
        }
    }

    fn refuse(&self, round_id: Option<u64>, reason: &str) -> DeliveryOutcome {
        warn!(round_id = ?round_id, reason, "Callback refused");
        self.stats.write().refused += 1;
        self.publish_rejection(round_id, reason.to_string());
        DeliveryOutcome::Refused(reason.to_string())
    }

    fn publish_rejection(&self, round_id: Option<u64>, reason: String) {
        let chain_id = self.chain.lock().chain_id();
        self.bus.send(OracleEvent::CallbackRejected {
            chain_id,
            contract: self.proxy_address,
            round_id,
            reason,
        });
    }
}

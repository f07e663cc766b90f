//! # Reactive Dispatch Adapter
//!
//! Plays the reactive network's system contract: it records the
//! subscriptions relays register at deployment and, for every origin log
//! that matches one, invokes `react` on the subscriber's ReactVM copy.
//! Callbacks the relay emits are published back to the bus.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use ro_02_reactive_relay::{
    CallbackEmitter, ReactiveRelay, ReactiveRelayApi, RelayError, SubscriptionFilter,
    SubscriptionService,
};
use shared_bus::{InMemoryEventBus, OracleEvent};
use shared_types::callback::CallbackRequest;
use shared_types::entities::{CallContext, LogRecord};
use shared_types::value_objects::Address;

use crate::chain::SharedChain;

/// A relay copy shared between the runtime and the dispatcher.
pub type SharedRelay = Arc<Mutex<ReactiveRelay<CallbackDispatcher>>>;

// =============================================================================
// CALLBACK DISPATCHER
// =============================================================================

/// Publishes every callback a relay emits as `CallbackRequested` and keeps
/// the relay's `Callback` log.
#[derive(Clone)]
pub struct CallbackDispatcher {
    bus: Arc<InMemoryEventBus>,
    rvm_id: Address,
    relay_address: Address,
    chain_id: u64,
    callback_log: Arc<RwLock<Vec<LogRecord>>>,
}

impl CallbackDispatcher {
    /// A dispatcher for the relay at `relay_address` on reactive chain
    /// `chain_id`, executing inside ReactVM `rvm_id`.
    pub fn new(
        bus: Arc<InMemoryEventBus>,
        rvm_id: Address,
        relay_address: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            bus,
            rvm_id,
            relay_address,
            chain_id,
            callback_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// `Callback` events emitted so far, oldest first.
    pub fn callback_log(&self) -> Vec<LogRecord> {
        self.callback_log.read().clone()
    }
}

impl CallbackEmitter for CallbackDispatcher {
    fn emit(&self, request: CallbackRequest) {
        let log = request.to_log(self.chain_id, self.relay_address);
        debug!(
            rvm_id = %self.rvm_id,
            chain_id = request.chain_id,
            contract = %request.contract,
            gas_limit = request.gas_limit,
            "Callback emitted"
        );
        self.callback_log.write().push(log);
        self.bus.send(OracleEvent::CallbackRequested {
            rvm_id: self.rvm_id,
            request,
        });
    }
}

// =============================================================================
// DISPATCH SERVICE
// =============================================================================

/// Dispatch counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Origin logs observed.
    pub logs_observed: u64,
    /// `react` invocations.
    pub dispatched: u64,
    /// Logs no subscription matched.
    pub unmatched: u64,
    /// Matches whose ReactVM was not attached.
    pub missing_vm: u64,
}

#[derive(Clone, Debug)]
struct Registration {
    subscriber: Address,
    filter: SubscriptionFilter,
}

/// Subscription registry and log dispatcher of the reactive network.
pub struct DispatchService {
    chain: SharedChain,
    registrations: RwLock<Vec<Registration>>,
    vms: RwLock<HashMap<Address, SharedRelay>>,
    stats: RwLock<DispatchStats>,
}

impl DispatchService {
    /// A dispatcher executing on the given reactive chain clock.
    pub fn new(chain: SharedChain) -> Self {
        Self {
            chain,
            registrations: RwLock::new(Vec::new()),
            vms: RwLock::new(HashMap::new()),
            stats: RwLock::new(DispatchStats::default()),
        }
    }

    /// Makes the ReactVM copy of `rvm_id` reachable for dispatch.
    pub fn attach_vm(&self, rvm_id: Address, relay: SharedRelay) {
        self.vms.write().insert(rvm_id, relay);
        debug!(rvm_id = %rvm_id, "ReactVM attached");
    }

    /// Number of registered subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.registrations.read().len()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> DispatchStats {
        self.stats.read().clone()
    }

    /// Delivers `log` to every subscriber with a matching filter, once per
    /// subscriber. Returns the number of `react` invocations.
    pub fn dispatch(&self, log: &LogRecord) -> usize {
        let mut subscribers: Vec<Address> = Vec::new();
        for registration in self.registrations.read().iter() {
            if registration.filter.matches(log) && !subscribers.contains(&registration.subscriber) {
                subscribers.push(registration.subscriber);
            }
        }

        self.stats.write().logs_observed += 1;
        if subscribers.is_empty() {
            debug!(
                chain_id = log.chain_id,
                contract = %log.contract,
                "No subscription matches log"
            );
            self.stats.write().unmatched += 1;
            return 0;
        }

        let block = self.chain.lock().next_block();
        let mut invoked = 0;
        for rvm_id in subscribers {
            let Some(relay) = self.vms.read().get(&rvm_id).cloned() else {
                warn!(rvm_id = %rvm_id, "Subscription matched but ReactVM is not attached");
                self.stats.write().missing_vm += 1;
                continue;
            };

            let ctx = CallContext::new(rvm_id, block).in_reactive_vm();
            if let Err(e) = relay.lock().react(&ctx, log) {
                warn!(rvm_id = %rvm_id, error = %e, "react failed");
                continue;
            }
            invoked += 1;
        }

        self.stats.write().dispatched += invoked as u64;
        invoked
    }
}

impl SubscriptionService for DispatchService {
    fn subscribe(&self, subscriber: Address, filter: SubscriptionFilter) -> Result<(), RelayError> {
        if filter.contract.is_zero() {
            return Err(RelayError::SubscriptionFailed(
                "subscription without a contract".to_string(),
            ));
        }
        info!(
            subscriber = %subscriber,
            chain_id = filter.chain_id,
            contract = %filter.contract,
            "Subscription registered"
        );
        self.registrations
            .write()
            .push(Registration { subscriber, filter });
        Ok(())
    }
}

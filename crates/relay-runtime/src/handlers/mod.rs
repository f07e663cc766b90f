//! # Event Handlers
//!
//! Long-running loops that move bus events into the adapters. Each handler
//! subscribes when it is constructed, so nothing published after
//! construction is missed, and stops when the bus closes.

use std::sync::Arc;

use tracing::{debug, info};

use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, OracleEvent, Subscription};

use crate::adapters::{CallbackDeliveryService, DispatchService};

/// Feeds origin logs to the reactive dispatcher.
pub struct DispatchHandler {
    service: Arc<DispatchService>,
    subscription: Subscription,
}

impl DispatchHandler {
    /// Subscribes to logs from every watched chain. Subscription filters
    /// decide what reaches a relay.
    pub fn new(service: Arc<DispatchService>, bus: &InMemoryEventBus) -> Self {
        Self {
            service,
            subscription: bus.subscribe(EventFilter::topics(vec![EventTopic::OriginLogs])),
        }
    }

    /// Run the handler loop.
    pub async fn run(mut self) {
        info!("Reactive dispatch handler started");

        while let Some(event) = self.subscription.recv().await {
            if let OracleEvent::OriginLog(log) = event {
                let invoked = self.service.dispatch(&log);
                debug!(block = log.block_number, invoked, "Origin log dispatched");
            }
        }

        info!("Reactive dispatch handler stopped (bus closed)");
    }
}

/// Feeds callback requests to the destination callback proxy.
pub struct DeliveryHandler {
    service: Arc<CallbackDeliveryService>,
    subscription: Subscription,
}

impl DeliveryHandler {
    /// Subscribes to every callback request; the service drops those
    /// addressed elsewhere.
    pub fn new(service: Arc<CallbackDeliveryService>, bus: &InMemoryEventBus) -> Self {
        Self {
            service,
            subscription: bus.subscribe(EventFilter::topics(vec![EventTopic::Callbacks])),
        }
    }

    /// Run the handler loop.
    pub async fn run(mut self) {
        info!("Callback delivery handler started");

        while let Some(event) = self.subscription.recv().await {
            if let OracleEvent::CallbackRequested { rvm_id, request } = event {
                let outcomes = self.service.deliver(rvm_id, request);
                debug!(attempts = outcomes.len(), "Callback delivered");
            }
        }

        info!("Callback delivery handler stopped (bus closed)");
    }
}

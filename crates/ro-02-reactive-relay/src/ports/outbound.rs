//! # Outbound Ports
//!
//! What the relay needs from the reactive network: a way to register
//! subscriptions and a way to emit callback requests.

use crate::domain::{RelayError, SubscriptionFilter};
use parking_lot::Mutex;
use shared_types::callback::CallbackRequest;
use shared_types::value_objects::Address;

/// Reactive system contract subscription interface - outbound port.
pub trait SubscriptionService: Send + Sync {
    /// Registers `filter` on behalf of `subscriber`.
    fn subscribe(&self, subscriber: Address, filter: SubscriptionFilter) -> Result<(), RelayError>;
}

/// Callback event sink - outbound port.
///
/// Emitting a log cannot fail once the transaction executes.
pub trait CallbackEmitter: Send + Sync {
    /// Emits the `Callback` event.
    fn emit(&self, request: CallbackRequest);
}

/// Mock subscription service for testing.
#[derive(Debug, Default)]
pub struct MockSubscriptionService {
    /// Every registration, in order.
    pub registered: Mutex<Vec<(Address, SubscriptionFilter)>>,
    /// When set, every registration fails with this message.
    pub fail_with: Option<String>,
}

impl MockSubscriptionService {
    /// Create a new mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that refuses every subscription.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            registered: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    /// Number of registrations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.registered.lock().len()
    }
}

impl SubscriptionService for MockSubscriptionService {
    fn subscribe(&self, subscriber: Address, filter: SubscriptionFilter) -> Result<(), RelayError> {
        if let Some(reason) = &self.fail_with {
            return Err(RelayError::SubscriptionFailed(reason.clone()));
        }
        self.registered.lock().push((subscriber, filter));
        Ok(())
    }
}

/// Mock callback emitter for testing.
#[derive(Debug, Default)]
pub struct MockCallbackEmitter {
    /// Every emitted request, in order.
    pub emitted: Mutex<Vec<CallbackRequest>>,
}

impl MockCallbackEmitter {
    /// Create a new mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitted requests.
    #[must_use]
    pub fn count(&self) -> usize {
        self.emitted.lock().len()
    }

    /// Removes and returns everything emitted so far.
    pub fn drain(&self) -> Vec<CallbackRequest> {
        std::mem::take(&mut *self.emitted.lock())
    }
}

impl CallbackEmitter for MockCallbackEmitter {
    fn emit(&self, request: CallbackRequest) {
        self.emitted.lock().push(request);
    }
}

impl<T: CallbackEmitter + ?Sized> CallbackEmitter for std::sync::Arc<T> {
    fn emit(&self, request: CallbackRequest) {
        (**self).emit(request);
    }
}

//! # Reactive Relay Service
//!
//! The relay contract. One copy is deployed on the reactive network, where
//! it registers its subscription and holds funds; the dispatch
//! infrastructure runs a second copy inside the deployer's ReactVM and
//! feeds it matching logs through `react`.
//!
//! The relay holds no protocol state. Every delivered log is judged on its
//! own, so redelivery produces the same callback again and ordering is left
//! to the feed proxy.

use crate::domain::{
    build_callback, validate_log, RelayConfig, RelayError, RelayStats, SubscriptionFilter,
    ValidationOutcome,
};
use crate::ports::inbound::ReactiveRelayApi;
use crate::ports::outbound::{CallbackEmitter, SubscriptionService};
use shared_types::constants::ANSWER_UPDATED_TOPIC;
use shared_types::entities::{CallContext, ExecutionEnvironment, LogRecord};
use shared_types::value_objects::{Address, U256};
use tracing::{debug, info, instrument, warn};

/// The reactive relay contract.
pub struct ReactiveRelay<E: CallbackEmitter> {
    config: RelayConfig,
    /// Deployer, and therefore the identity of the ReactVM running this copy.
    rvm_id: Address,
    environment: ExecutionEnvironment,
    emitter: E,
    balance: U256,
    stats: RelayStats,
}

impl<E: CallbackEmitter> ReactiveRelay<E> {
    /// Deploys the relay.
    ///
    /// On the reactive network this subscribes to `AnswerUpdated` from the
    /// configured origin feed. Inside the ReactVM the system contract is not
    /// reachable and no subscription is made.
    #[instrument(skip_all, fields(deployer = %ctx.sender, environment = ?ctx.environment))]
    pub fn deploy<S: SubscriptionService + ?Sized>(
        config: RelayConfig,
        ctx: &CallContext,
        emitter: E,
        subscriptions: &S,
    ) -> Result<Self, RelayError> {
        let config = config.validate()?;
        let relay = Self {
            config,
            rvm_id: ctx.sender,
            environment: ctx.environment,
            emitter,
            balance: ctx.value,
            stats: RelayStats::default(),
        };

        if relay.environment == ExecutionEnvironment::Network {
            subscriptions.subscribe(relay.rvm_id, relay.subscription_filter())?;
            info!(
                origin_chain_id = relay.config.origin_chain_id,
                origin_feed = %relay.config.origin_feed,
                "Subscribed to origin AnswerUpdated"
            );
        }

        Ok(relay)
    }

    /// The subscription this relay registers.
    #[must_use]
    pub fn subscription_filter(&self) -> SubscriptionFilter {
        SubscriptionFilter::for_event(
            self.config.origin_chain_id,
            self.config.origin_feed,
            ANSWER_UPDATED_TOPIC,
        )
    }

    /// Deployment parameters.
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Identity of the ReactVM this relay belongs to.
    #[must_use]
    pub fn rvm_id(&self) -> Address {
        self.rvm_id
    }

    /// Where this copy was deployed.
    #[must_use]
    pub fn environment(&self) -> ExecutionEnvironment {
        self.environment
    }

    /// The callback sink.
    #[must_use]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }
}

impl<E: CallbackEmitter> ReactiveRelayApi for ReactiveRelay<E> {
    #[instrument(skip_all, fields(chain_id = log.chain_id, block = log.block_number))]
    fn react(&mut self, ctx: &CallContext, log: &LogRecord) -> Result<(), RelayError> {
        if ctx.environment != ExecutionEnvironment::ReactiveVm {
            warn!(caller = %ctx.sender, "react invoked outside the ReactVM");
            self.stats.unauthorized_calls += 1;
            return Err(RelayError::NotReactiveVm);
        }
        self.stats.logs_received += 1;

        let event = match self.validate(log) {
            ValidationOutcome::Accepted(event) => event,
            ValidationOutcome::Rejected(reason) => {
                debug!(%reason, contract = %log.contract, "Log ignored");
                *self.stats.rejected.entry(reason).or_insert(0) += 1;
                return Ok(());
            }
        };

        let request = build_callback(&self.config, &event);
        info!(
            round_id = event.round_id,
            answer = event.answer,
            updated_at = event.updated_at,
            destination = %request.contract,
            "Forwarding origin update"
        );
        self.emitter.emit(request);
        self.stats.callbacks_emitted += 1;
        Ok(())
    }

    fn validate(&self, log: &LogRecord) -> ValidationOutcome {
        validate_log(&self.config, log)
    }

    fn pay(&mut self, ctx: &CallContext) -> Result<(), RelayError> {
        if ctx.sender != self.config.system_contract {
            warn!(caller = %ctx.sender, "pay from non-system caller");
            self.stats.unauthorized_calls += 1;
            return Err(RelayError::NotSystemContract { caller: ctx.sender });
        }
        self.balance = self.balance.saturating_add(ctx.value);
        debug!(value = %ctx.value, "Payment settled");
        Ok(())
    }

    fn receive(&mut self, ctx: &CallContext) {
        self.balance = self.balance.saturating_add(ctx.value);
    }

    fn balance(&self) -> U256 {
        self.balance
    }

    fn stats(&self) -> RelayStats {
        self.stats.clone()
    }
}

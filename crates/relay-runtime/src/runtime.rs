//! # Oracle Runtime
//!
//! Deploys the three contracts on their simulated chains and runs the
//! handlers that carry events between them.
//!
//! ## Deployment Sequence
//!
//! 1. Origin feed on the origin chain, optionally seeded with round 1
//! 2. Feed proxy on the destination chain, trusting the configured RVM id
//! 3. Relay on the reactive network (registers its subscription)
//! 4. Relay inside its ReactVM (attached to the dispatcher)
//! 5. `start()` spawns the dispatch and delivery handlers

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use ro_01_origin_feed::{
    AnswerUpdated, OriginFeed, OriginFeedApi, OriginFeedConfig, OriginFeedError,
};
use ro_02_reactive_relay::{
    ReactiveRelay, ReactiveRelayApi, RelayConfig, RelayError, RelayStats,
};
use ro_03_feed_proxy::{FeedProxy, FeedProxyApi, ProxyConfig, ProxyError, ProxyState};
use shared_bus::{BusStats, EventFilter, InMemoryEventBus, OracleEvent, Subscription};
use shared_types::entities::{CallContext, LogRecord, RoundData};
use shared_types::feed::AggregatorV3;
use shared_types::value_objects::{Address, U256};

use crate::adapters::{
    CallbackDeliveryService, CallbackDispatcher, DeliveryStats, DispatchService, DispatchStats,
    SharedProxy, SharedRelay,
};
use crate::chain::{SharedChain, SimulatedChain};
use crate::config::{ConfigError, RuntimeConfig};
use crate::handlers::{DeliveryHandler, DispatchHandler};

const MIRROR_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration rejected.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Origin feed call reverted.
    #[error("origin feed: {0}")]
    Origin(#[from] OriginFeedError),

    /// Relay call reverted.
    #[error("reactive relay: {0}")]
    Relay(#[from] RelayError),

    /// Proxy call reverted.
    #[error("feed proxy: {0}")]
    Proxy(#[from] ProxyError),
}

/// Point-in-time view of the whole deployment.
#[derive(Clone, Debug)]
pub struct RuntimeStatus {
    /// Latest origin round.
    pub origin_latest: RoundData,
    /// Latest mirrored round.
    pub mirror_latest: RoundData,
    /// Whether the proxy has accepted a round.
    pub proxy_state: ProxyState,
    /// Proxy balance.
    pub proxy_balance: U256,
    /// Relay balance on the reactive network.
    pub relay_balance: U256,
    /// Counters of the ReactVM relay copy.
    pub relay_stats: RelayStats,
    /// Dispatcher counters.
    pub dispatch: DispatchStats,
    /// Delivery counters.
    pub delivery: DeliveryStats,
    /// Bus counters.
    pub bus: BusStats,
}

impl RuntimeStatus {
    /// True when the mirror holds the origin's latest round.
    pub fn in_sync(&self) -> bool {
        self.mirror_latest.round_id == self.origin_latest.round_id
            && self.mirror_latest.answer == self.origin_latest.answer
    }
}

/// The simulated three-chain deployment.
pub struct OracleRuntime {
    config: RuntimeConfig,
    bus: Arc<InMemoryEventBus>,
    origin_chain: SharedChain,
    reactive_chain: SharedChain,
    destination_chain: SharedChain,
    origin: Mutex<OriginFeed>,
    relay: SharedRelay,
    relay_vm: SharedRelay,
    proxy: SharedProxy,
    dispatch: Arc<DispatchService>,
    delivery: Arc<CallbackDeliveryService>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl OracleRuntime {
    /// Validates `config` and deploys every contract.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        info!("Deploying reactive oracle");

        let bus = Arc::new(InMemoryEventBus::new());
        let genesis = config.genesis_timestamp;
        let deployer = config.reactive.rvm_id;

        let origin_chain = SimulatedChain::new(
            config.origin.chain_id,
            genesis,
            config.origin.block_time_secs,
        )
        .shared();
        let reactive_chain = SimulatedChain::new(
            config.reactive.chain_id,
            genesis,
            config.reactive.block_time_secs,
        )
        .shared();
        let destination_chain = SimulatedChain::new(
            config.destination.chain_id,
            genesis,
            config.destination.block_time_secs,
        )
        .shared();

        // 1. Origin feed
        let origin_config = OriginFeedConfig {
            description: config.origin.description.clone(),
            ..OriginFeedConfig::default()
        };
        let origin_ctx = origin_chain.lock().ctx(deployer);
        let origin = match config.origin.initial_answer {
            Some(answer) => OriginFeed::with_initial_answer(origin_config, &origin_ctx, answer)?,
            None => OriginFeed::new(origin_config, &origin_ctx),
        };

        // 2. Feed proxy
        let proxy_config = ProxyConfig {
            callback_proxy: config.destination.callback_proxy,
            description: config.destination.description.clone(),
            ..ProxyConfig::new(config.reactive.rvm_id)
        };
        let proxy_ctx = destination_chain
            .lock()
            .ctx(deployer)
            .with_value(config.destination.initial_funding);
        let proxy = Arc::new(Mutex::new(FeedProxy::new(proxy_config, &proxy_ctx)?));

        // 3. + 4. Relay on the network and inside its ReactVM
        let dispatch = Arc::new(DispatchService::new(reactive_chain.clone()));
        let relay_config = RelayConfig {
            origin_chain_id: config.origin.chain_id,
            destination_chain_id: config.destination.chain_id,
            origin_feed: config.origin.feed_address,
            destination_contract: config.destination.proxy_address,
            system_contract: config.reactive.system_contract,
            callback_gas_limit: config.reactive.callback_gas_limit,
        };
        let emitter = CallbackDispatcher::new(
            bus.clone(),
            config.reactive.rvm_id,
            config.reactive.relay_address,
            config.reactive.chain_id,
        );

        let network_ctx = reactive_chain
            .lock()
            .ctx(deployer)
            .with_value(config.reactive.initial_funding);
        let relay = ReactiveRelay::deploy(
            relay_config.clone(),
            &network_ctx,
            emitter.clone(),
            dispatch.as_ref(),
        )?;
        let vm_ctx = reactive_chain.lock().ctx(deployer).in_reactive_vm();
        let relay_vm = ReactiveRelay::deploy(relay_config, &vm_ctx, emitter, dispatch.as_ref())?;

        let relay = Arc::new(Mutex::new(relay));
        let relay_vm = Arc::new(Mutex::new(relay_vm));
        dispatch.attach_vm(config.reactive.rvm_id, relay_vm.clone());

        let delivery = Arc::new(CallbackDeliveryService::new(
            destination_chain.clone(),
            config.destination.proxy_address,
            config.destination.callback_proxy,
            proxy.clone(),
            config.delivery.clone(),
            bus.clone(),
        ));

        info!(
            origin_chain_id = config.origin.chain_id,
            reactive_chain_id = config.reactive.chain_id,
            destination_chain_id = config.destination.chain_id,
            rvm_id = %config.reactive.rvm_id,
            "Reactive oracle deployed"
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            bus,
            origin_chain,
            reactive_chain,
            destination_chain,
            origin: Mutex::new(origin),
            relay,
            relay_vm,
            proxy,
            dispatch,
            delivery,
            handles: Mutex::new(Vec::new()),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Spawns the dispatch and delivery handlers.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let mut handles = self.handles.lock();
        if !handles.is_empty() {
            warn!("Runtime already started");
            return;
        }

        let dispatch_handler = DispatchHandler::new(self.dispatch.clone(), &self.bus);
        let mut dispatch_shutdown = self.shutdown_rx.clone();
        handles.push(tokio::spawn(async move {
            tokio::select! {
                _ = dispatch_handler.run() => {}
                _ = dispatch_shutdown.changed() => {
                    info!("Reactive dispatch shutdown signal received");
                }
            }
        }));

        let delivery_handler = DeliveryHandler::new(self.delivery.clone(), &self.bus);
        let mut delivery_shutdown = self.shutdown_rx.clone();
        handles.push(tokio::spawn(async move {
            tokio::select! {
                _ = delivery_handler.run() => {}
                _ = delivery_shutdown.changed() => {
                    info!("Callback delivery shutdown signal received");
                }
            }
        }));

        info!("Relay handlers running");
    }

    /// Signals the handlers to stop and waits for them.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        let _ = self.shutdown_tx.send(true);

        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Handler task failed");
            }
        }
        info!("Shutdown complete");
    }

    // =========================================================================
    // ORIGIN CHAIN
    // =========================================================================

    /// Records a new origin round one block after the current head and
    /// publishes its `AnswerUpdated` log.
    ///
    /// The origin chain stays locked until the log is published, so rounds
    /// and their logs follow block order under concurrent callers.
    pub fn submit_price(&self, answer: i128) -> Result<AnswerUpdated, RuntimeError> {
        let mut chain = self.origin_chain.lock();
        let block = chain.next_block();
        let ctx = CallContext::new(self.config.reactive.rvm_id, block);
        let event = self.origin.lock().submit_price(&ctx, answer)?;

        let log = event.to_log(block.chain_id, self.config.origin.feed_address, &block);
        self.bus.send(OracleEvent::OriginLog(log));
        drop(chain);
        Ok(event)
    }

    /// Moves the origin clock forward without recording a round.
    pub fn advance_origin(&self, secs: u64) {
        self.origin_chain.lock().advance(secs);
    }

    /// Publishes an arbitrary log as if a watched chain recorded it.
    pub fn inject_log(&self, log: LogRecord) {
        self.bus.send(OracleEvent::OriginLog(log));
    }

    /// Latest origin round.
    pub fn origin_latest(&self) -> RoundData {
        self.origin.lock().latest_round_data()
    }

    /// Every origin round, oldest first.
    pub fn origin_history(&self) -> Vec<RoundData> {
        self.origin.lock().history()
    }

    // =========================================================================
    // REACTIVE NETWORK
    // =========================================================================

    /// Sends `value` to the relay on the reactive network.
    pub fn fund_relay(&self, value: U256) {
        let ctx = self
            .reactive_chain
            .lock()
            .ctx(self.config.reactive.rvm_id)
            .with_value(value);
        self.relay.lock().receive(&ctx);
    }

    /// Settles relay debt as `caller`. Only the system contract may.
    pub fn settle_relay_debt(&self, caller: Address, value: U256) -> Result<(), RuntimeError> {
        let ctx = self.reactive_chain.lock().ctx(caller).with_value(value);
        self.relay.lock().pay(&ctx)?;
        Ok(())
    }

    /// `Callback` events the relay emitted, oldest first.
    pub fn callback_log(&self) -> Vec<LogRecord> {
        self.relay_vm.lock().emitter().callback_log()
    }

    // =========================================================================
    // DESTINATION CHAIN
    // =========================================================================

    /// Latest mirrored round.
    pub fn mirror_latest(&self) -> RoundData {
        self.proxy.lock().latest_round_data()
    }

    /// Sends `value` to the feed proxy.
    pub fn fund_proxy(&self, value: U256) {
        let ctx = self
            .destination_chain
            .lock()
            .ctx(self.config.reactive.rvm_id)
            .with_value(value);
        self.proxy.lock().receive(&ctx);
    }

    /// Waits until the mirror reaches `round_id`, or `timeout` elapses.
    pub async fn wait_for_mirror(&self, round_id: u64, timeout: Duration) -> Option<RoundData> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let latest = self.mirror_latest();
            if latest.round_id >= round_id {
                return Some(latest);
            }
            if tokio::time::Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(MIRROR_POLL_INTERVAL).await;
        }
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    /// Subscribes to bus events.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Snapshot of every contract and service.
    pub fn status(&self) -> RuntimeStatus {
        let (mirror_latest, proxy_state, proxy_balance) = {
            let proxy = self.proxy.lock();
            (proxy.latest_round_data(), proxy.state(), proxy.balance())
        };
        RuntimeStatus {
            origin_latest: self.origin_latest(),
            mirror_latest,
            proxy_state,
            proxy_balance,
            relay_balance: self.relay.lock().balance(),
            relay_stats: self.relay_vm.lock().stats(),
            dispatch: self.dispatch.stats(),
            delivery: self.delivery.stats(),
            bus: self.bus.stats(),
        }
    }

    /// The configuration this runtime was deployed with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

//! # Feed Proxy Service
//!
//! The destination mirror. It keeps a single overwritten round and accepts
//! a new one only when the callback proxy delivers it on behalf of the
//! configured relay, for this protocol version, and strictly newer than what
//! it holds.
//!
//! Callbacks may arrive duplicated or out of order. Both are rejected by the
//! monotonic guard with `StaleRound`, leaving state untouched.

use crate::domain::{invariant_is_newer, AuthFailure, ProxyConfig, ProxyError, ProxyState};
use crate::events::PriceSynced;
use crate::ports::inbound::FeedProxyApi;
use shared_types::callback::UpdatePriceCall;
use shared_types::constants::domain_separator;
use shared_types::entities::{CallContext, RoundData};
use shared_types::feed::AggregatorV3;
use shared_types::value_objects::{Hash, U256};
use tracing::{debug, info, instrument, warn};

/// The destination feed proxy contract.
#[derive(Clone, Debug)]
pub struct FeedProxy {
    config: ProxyConfig,
    domain_separator: Hash,
    latest: RoundData,
    state: ProxyState,
    balance: U256,
}

impl FeedProxy {
    /// Deploys the proxy. Fails on a zero relay identity.
    pub fn new(config: ProxyConfig, ctx: &CallContext) -> Result<Self, ProxyError> {
        config.validate()?;
        debug!(
            reactive_vm_id = %config.reactive_vm_id,
            callback_proxy = %config.callback_proxy,
            "Feed proxy deployed"
        );
        Ok(Self {
            config,
            domain_separator: domain_separator(),
            latest: RoundData::empty(ctx.timestamp()),
            state: ProxyState::Uninitialized,
            balance: ctx.value,
        })
    }

    /// Deployment parameters.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    fn authorize_sender(&self, ctx: &CallContext) -> Result<(), ProxyError> {
        if ctx.sender != self.config.callback_proxy {
            warn!(caller = %ctx.sender, "Call from non-callback-proxy");
            return Err(ProxyError::Unauthorized(AuthFailure::NotCallbackProxy {
                caller: ctx.sender,
            }));
        }
        Ok(())
    }
}

impl AggregatorV3 for FeedProxy {
    type Error = ProxyError;

    fn decimals(&self) -> u8 {
        self.config.decimals
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn version(&self) -> u64 {
        self.config.version
    }

    fn latest_round_data(&self) -> RoundData {
        self.latest
    }

    fn get_round_data(&self, round_id: u64) -> Result<RoundData, ProxyError> {
        if self.state == ProxyState::Live && round_id == self.latest.round_id {
            return Ok(self.latest);
        }
        Err(ProxyError::RoundNotFound(round_id))
    }
}

impl FeedProxyApi for FeedProxy {
    #[instrument(skip_all, fields(round_id = call.round_id, updated_at = call.updated_at))]
    fn update_price(
        &mut self,
        ctx: &CallContext,
        call: UpdatePriceCall,
    ) -> Result<PriceSynced, ProxyError> {
        self.authorize_sender(ctx)?;

        if call.rvm_id != self.config.reactive_vm_id {
            warn!(attested = %call.rvm_id, "Callback attested by unknown relay");
            return Err(ProxyError::Unauthorized(AuthFailure::WrongReactiveVm {
                expected: self.config.reactive_vm_id,
                found: call.rvm_id,
            }));
        }

        if call.domain_separator != self.domain_separator {
            warn!(domain = %call.domain_separator, "Callback for another protocol version");
            return Err(ProxyError::InvalidDomain);
        }

        let incoming = call.round();
        if !invariant_is_newer(&self.latest, &incoming) {
            warn!(
                latest_round = self.latest.round_id,
                latest_updated_at = self.latest.updated_at,
                "Stale round rejected"
            );
            return Err(ProxyError::StaleRound {
                incoming_round: incoming.round_id,
                latest_round: self.latest.round_id,
            });
        }

        self.latest = incoming;
        self.state = ProxyState::Live;
        info!(answer = incoming.answer, "Price synced");
        Ok(PriceSynced::for_round(&incoming))
    }

    fn handle_callback(
        &mut self,
        ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<PriceSynced, ProxyError> {
        let call = UpdatePriceCall::decode(calldata).map_err(|e| {
            debug!(error = %e, "Undecodable callback");
            ProxyError::MalformedCalldata(e)
        })?;
        self.update_price(ctx, call)
    }

    fn pay(&mut self, ctx: &CallContext) -> Result<(), ProxyError> {
        self.authorize_sender(ctx)?;
        self.balance = self.balance.saturating_add(ctx.value);
        Ok(())
    }

    fn receive(&mut self, ctx: &CallContext) {
        self.balance = self.balance.saturating_add(ctx.value);
    }

    fn balance(&self) -> U256 {
        self.balance
    }

    fn state(&self) -> ProxyState {
        self.state
    }
}

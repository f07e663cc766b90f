//! # Driving Ports (API - Inbound)
//!
//! The write surface of the feed proxy. The read surface is the shared
//! `AggregatorV3` interface.

use crate::domain::{ProxyError, ProxyState};
use crate::events::PriceSynced;
use shared_types::callback::UpdatePriceCall;
use shared_types::entities::CallContext;
use shared_types::feed::AggregatorV3;
use shared_types::value_objects::U256;

/// Feed proxy API.
pub trait FeedProxyApi: AggregatorV3<Error = ProxyError> {
    /// Accepts an authenticated, strictly newer round.
    ///
    /// Checks, in order: sender is the callback proxy, attested relay
    /// identity, domain separator, monotonic guard.
    fn update_price(
        &mut self,
        ctx: &CallContext,
        call: UpdatePriceCall,
    ) -> Result<PriceSynced, ProxyError>;

    /// Decodes raw `updatePrice` calldata and applies it.
    fn handle_callback(
        &mut self,
        ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<PriceSynced, ProxyError>;

    /// Settles callback debt. Callback proxy only.
    fn pay(&mut self, ctx: &CallContext) -> Result<(), ProxyError>;

    /// Unrestricted top-up.
    fn receive(&mut self, ctx: &CallContext);

    /// Native balance held by the proxy.
    fn balance(&self) -> U256;

    /// Lifecycle state.
    fn state(&self) -> ProxyState;
}

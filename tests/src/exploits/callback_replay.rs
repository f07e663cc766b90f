//! # Callback Replay and Forgery
//!
//! Attacks on the callback hop: replaying an accepted payload, forging the
//! identity slot, pointing a payload at another protocol version, and
//! invoking the relay outside its ReactVM.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use relay_runtime::adapters::{CallbackDeliveryService, DeliveryOutcome};
    use relay_runtime::{DeliveryConfig, SimulatedChain};
    use ro_02_reactive_relay::{
        MockCallbackEmitter, MockSubscriptionService, ReactiveRelay, ReactiveRelayApi,
        RelayConfig, RelayError,
    };
    use ro_03_feed_proxy::{AuthFailure, ProxyError};
    use shared_bus::InMemoryEventBus;
    use shared_types::abi::keccak256;
    use shared_types::callback::{CallbackRequest, UpdatePriceCall};
    use shared_types::constants::{CALLBACK_PROXY, DESTINATION_CHAIN_ID};
    use shared_types::entities::CallContext;
    use shared_types::feed::AggregatorV3;
    use shared_types::value_objects::{Address, Bytes};

    use crate::fixtures::{Pipeline, FEED, PROXY, RVM_ID, T0};

    const ATTACKER: Address = Address::repeat_byte(0xBA);

    fn delivery_for(pipeline: &Pipeline) -> CallbackDeliveryService {
        CallbackDeliveryService::new(
            SimulatedChain::new(DESTINATION_CHAIN_ID, T0, 12).shared(),
            PROXY,
            CALLBACK_PROXY,
            Arc::new(Mutex::new(pipeline.proxy.clone())),
            DeliveryConfig::default(),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn test_replayed_callback_is_stale() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);
        let request = pipeline.react(&log).remove(0);

        pipeline.deliver(request.clone()).unwrap();
        let err = pipeline.deliver(request).unwrap_err();
        assert_eq!(
            err,
            ProxyError::StaleRound {
                incoming_round: 2,
                latest_round: 2,
            }
        );
        assert_eq!(pipeline.proxy.latest_round_data().answer, 3_110_000_000_000);
    }

    #[test]
    fn test_payload_for_other_protocol_version() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);
        let request = pipeline.react(&log).remove(0);

        let call = UpdatePriceCall::decode(request.payload.as_slice()).unwrap();
        let forged = UpdatePriceCall {
            domain_separator: keccak256(b"REACTIVE_ORACLE_V0"),
            ..call
        };
        let request = CallbackRequest {
            payload: Bytes::from_vec(forged.encode()),
            ..request
        };

        assert_eq!(pipeline.deliver(request), Err(ProxyError::InvalidDomain));
        assert!(pipeline.proxy.latest_round_data().is_empty());
    }

    #[test]
    fn test_prefilled_identity_is_overwritten() {
        let mut pipeline = Pipeline::deploy();

        // A rogue relay deployed by the attacker claims the trusted identity.
        let mut rogue = ReactiveRelay::deploy(
            RelayConfig::new(FEED, PROXY),
            &CallContext::new(ATTACKER, pipeline.reactive_chain.block()).in_reactive_vm(),
            MockCallbackEmitter::new(),
            &MockSubscriptionService::new(),
        )
        .unwrap();
        let log = pipeline.submit(9_999_000_000_000);
        rogue
            .react(&pipeline.reactive_chain.ctx(ATTACKER).in_reactive_vm(), &log)
            .unwrap();
        let mut request = rogue.emitter().drain().remove(0);
        assert!(request.inject_identity(RVM_ID));

        // The callback proxy stamps the emitting VM, not what the payload says.
        assert!(request.inject_identity(rogue.rvm_id()));
        let err = pipeline.execute_as(CALLBACK_PROXY, &request).unwrap_err();
        assert_eq!(
            err,
            ProxyError::Unauthorized(AuthFailure::WrongReactiveVm {
                expected: RVM_ID,
                found: ATTACKER,
            })
        );
        assert!(pipeline.proxy.latest_round_data().is_empty());
    }

    #[test]
    fn test_forged_identity_without_callback_proxy() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(9_999_000_000_000);
        let mut request = pipeline.react(&log).remove(0);
        request.inject_identity(RVM_ID);

        let err = pipeline.execute_as(ATTACKER, &request).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "FeedProxy: not Reactive proxy");
    }

    #[test]
    fn test_request_for_other_proxy_is_ignored() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);
        let request = pipeline.react(&log).remove(0);
        let delivery = delivery_for(&pipeline);

        let elsewhere = CallbackRequest {
            contract: Address::repeat_byte(0xCC),
            ..request.clone()
        };
        assert!(delivery.deliver(RVM_ID, elsewhere).is_empty());

        let other_chain = CallbackRequest {
            chain_id: 1,
            ..request.clone()
        };
        assert!(delivery.deliver(RVM_ID, other_chain).is_empty());
        assert_eq!(delivery.stats().ignored, 2);

        let outcomes = delivery.deliver(RVM_ID, request);
        assert!(matches!(
            outcomes.as_slice(),
            [DeliveryOutcome::Synced(round)] if round.round_id == 2
        ));
    }

    #[test]
    fn test_starved_gas_limit_is_refused() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);
        let request = CallbackRequest {
            gas_limit: 21_000,
            ..pipeline.react(&log).remove(0)
        };
        let delivery = delivery_for(&pipeline);

        let outcomes = delivery.deliver(RVM_ID, request);
        assert!(matches!(outcomes.as_slice(), [DeliveryOutcome::Refused(_)]));
        assert_eq!(delivery.stats().executions, 0);
    }

    #[test]
    fn test_react_outside_reactive_vm() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);

        let network = CallContext::new(ATTACKER, pipeline.reactive_chain.block());
        assert_eq!(
            pipeline.relay.react(&network, &log),
            Err(RelayError::NotReactiveVm)
        );
        assert_eq!(pipeline.relay.emitter().count(), 0);
        assert_eq!(pipeline.relay.stats().unauthorized_calls, 1);
        assert_eq!(pipeline.relay.stats().logs_received, 0);
    }
}

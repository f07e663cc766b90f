//! # Unauthorized Callers
//!
//! Direct calls to the privileged entry points from accounts that hold no
//! authority. Each must revert and leave balances and the mirror as they
//! were.

#[cfg(test)]
mod tests {
    use ro_02_reactive_relay::{ReactiveRelayApi, RelayError};
    use ro_03_feed_proxy::{AuthFailure, FeedProxyApi, ProxyError, ProxyState};
    use shared_types::callback::UpdatePriceCall;
    use shared_types::constants::{domain_separator, CALLBACK_PROXY, SYSTEM_CONTRACT};
    use shared_types::entities::CallContext;
    use shared_types::feed::AggregatorV3;
    use shared_types::value_objects::{Address, U256};

    use crate::fixtures::{Pipeline, RVM_ID, T0};

    const ATTACKER: Address = Address::repeat_byte(0xBA);

    fn honest_call(round_id: u64, answer: i128) -> UpdatePriceCall {
        UpdatePriceCall {
            rvm_id: RVM_ID,
            domain_separator: domain_separator(),
            round_id,
            answer,
            started_at: T0 + 2,
            updated_at: T0 + 2,
            answered_in_round: round_id,
        }
    }

    #[test]
    fn test_update_price_from_arbitrary_sender() {
        let mut pipeline = Pipeline::deploy();
        let ctx = CallContext::new(ATTACKER, pipeline.destination_chain.next_block());

        let err = pipeline
            .proxy
            .update_price(&ctx, honest_call(2, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ProxyError::Unauthorized(AuthFailure::NotCallbackProxy { caller: ATTACKER })
        );
        assert_eq!(pipeline.proxy.state(), ProxyState::Uninitialized);
        assert_eq!(pipeline.proxy.latest_round_data().as_tuple(), (0, 0, T0, 0, 0));
    }

    #[test]
    fn test_relay_identity_cannot_bypass_callback_proxy() {
        let mut pipeline = Pipeline::deploy();
        let ctx = CallContext::new(RVM_ID, pipeline.destination_chain.next_block());

        let err = pipeline
            .proxy
            .update_price(&ctx, honest_call(2, 1))
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(pipeline.proxy.latest_round_data().is_empty());
    }

    #[test]
    fn test_unauthorized_calls_do_not_block_honest_updates() {
        let mut pipeline = Pipeline::deploy();
        for _ in 0..3 {
            let ctx = CallContext::new(ATTACKER, pipeline.destination_chain.next_block());
            assert!(pipeline.proxy.update_price(&ctx, honest_call(50, 1)).is_err());
        }

        let synced = pipeline.relay_price(3_110_000_000_000).unwrap();
        assert_eq!(synced.round_id, 2);
    }

    #[test]
    fn test_proxy_pay_only_from_callback_proxy() {
        let mut pipeline = Pipeline::deploy();
        let before = pipeline.proxy.balance();

        let ctx = pipeline
            .destination_chain
            .ctx(ATTACKER)
            .with_value(U256::from(500u64));
        assert!(pipeline.proxy.pay(&ctx).unwrap_err().is_unauthorized());
        assert_eq!(pipeline.proxy.balance(), before);

        let ctx = pipeline
            .destination_chain
            .ctx(CALLBACK_PROXY)
            .with_value(U256::from(500u64));
        pipeline.proxy.pay(&ctx).unwrap();
        assert_eq!(pipeline.proxy.balance(), before + U256::from(500u64));
    }

    #[test]
    fn test_anyone_may_fund_proxy() {
        let mut pipeline = Pipeline::deploy();
        let before = pipeline.proxy.balance();

        let ctx = pipeline
            .destination_chain
            .ctx(ATTACKER)
            .with_value(U256::from(7u64));
        pipeline.proxy.receive(&ctx);
        assert_eq!(pipeline.proxy.balance(), before + U256::from(7u64));
        assert_eq!(pipeline.proxy.state(), ProxyState::Uninitialized);
    }

    #[test]
    fn test_relay_pay_only_from_system_contract() {
        let mut pipeline = Pipeline::deploy();
        let before = pipeline.relay.balance();

        let ctx = pipeline
            .reactive_chain
            .ctx(ATTACKER)
            .with_value(U256::from(1_000u64));
        assert_eq!(
            pipeline.relay.pay(&ctx),
            Err(RelayError::NotSystemContract { caller: ATTACKER })
        );
        assert_eq!(pipeline.relay.balance(), before);
        assert_eq!(pipeline.relay.stats().unauthorized_calls, 1);

        let ctx = pipeline
            .reactive_chain
            .ctx(SYSTEM_CONTRACT)
            .with_value(U256::from(1_000u64));
        pipeline.relay.pay(&ctx).unwrap();
        assert_eq!(pipeline.relay.balance(), before + U256::from(1_000u64));
    }

    #[test]
    fn test_deployer_is_not_system_contract() {
        let mut pipeline = Pipeline::deploy();
        let ctx = pipeline.reactive_chain.ctx(RVM_ID).with_value(U256::one());
        assert!(matches!(
            pipeline.relay.pay(&ctx),
            Err(RelayError::NotSystemContract { .. })
        ));
    }
}

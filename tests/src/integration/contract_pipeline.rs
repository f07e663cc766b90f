//! # Contract Pipeline
//!
//! Origin feed → reactive relay → feed proxy with every hop called
//! directly. Verifies that what the destination stores is exactly what the
//! origin recorded, modulo the `startedAt` pass-through.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Pipeline, FEED, INITIAL_ANSWER, PROXY, RVM_ID, T0};
    use ro_01_origin_feed::OriginFeedApi;
    use ro_02_reactive_relay::ReactiveRelayApi;
    use ro_03_feed_proxy::{FeedProxyApi, ProxyState};
    use shared_types::callback::UpdatePriceCall;
    use shared_types::constants::{domain_separator, ANSWER_UPDATED_DATA_LEN, DESTINATION_CHAIN_ID};
    use shared_types::entities::CallContext;
    use shared_types::feed::AggregatorV3;
    use shared_types::value_objects::Address;

    // =============================================================================
    // ORIGIN
    // =============================================================================

    #[test]
    fn test_seeded_origin_then_first_update() {
        let mut pipeline = Pipeline::deploy();
        assert_eq!(
            pipeline.origin.latest_round_data().as_tuple(),
            (1, INITIAL_ANSWER, T0, T0, 1)
        );

        let log = pipeline.submit(3_110_000_000_000);
        assert_eq!(log.chain_id, 80_002);
        assert_eq!(log.contract, FEED);
        assert_eq!(
            pipeline.origin.latest_round_data().as_tuple(),
            (2, 3_110_000_000_000, T0, T0 + 2, 2)
        );
    }

    #[test]
    fn test_origin_event_fields() {
        let mut pipeline = Pipeline::deploy();
        let block = pipeline.origin_chain.next_block();
        let event = pipeline
            .origin
            .submit_price(&CallContext::new(RVM_ID, block), 3_110_000_000_000)
            .unwrap();

        assert_eq!(
            (event.current, event.round_id, event.updated_at),
            (3_110_000_000_000, 2, block.timestamp)
        );
        assert_eq!(event.encode_data().len(), ANSWER_UPDATED_DATA_LEN);
    }

    #[test]
    fn test_origin_history_is_contiguous() {
        let mut pipeline = Pipeline::deploy();
        for answer in [1, 2, 3, 4] {
            pipeline.submit(answer);
        }

        let history = pipeline.origin.history();
        assert_eq!(history.len(), 5);
        for pair in history.windows(2) {
            assert_eq!(pair[1].round_id, pair[0].round_id + 1);
            assert_eq!(pair[1].started_at, pair[0].updated_at);
        }
    }

    // =============================================================================
    // RELAY
    // =============================================================================

    #[test]
    fn test_relay_builds_callback_from_origin_log() {
        let mut pipeline = Pipeline::deploy();
        let log = pipeline.submit(3_110_000_000_000);
        let requests = pipeline.react(&log);

        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.chain_id, DESTINATION_CHAIN_ID);
        assert_eq!(request.contract, PROXY);
        assert_eq!(request.reserved_identity(), Some(Address::ZERO));

        let call = UpdatePriceCall::decode(request.payload.as_slice()).unwrap();
        assert_eq!(call.domain_separator, domain_separator());
        assert_eq!(call.round_id, 2);
        assert_eq!(call.answer, 3_110_000_000_000);
        assert_eq!(call.started_at, call.updated_at);
        assert_eq!(call.answered_in_round, 2);
    }

    // =============================================================================
    // END TO END
    // =============================================================================

    #[test]
    fn test_update_reaches_proxy() {
        let mut pipeline = Pipeline::deploy();
        assert_eq!(pipeline.proxy.state(), ProxyState::Uninitialized);

        let synced = pipeline.relay_price(3_110_000_000_000).unwrap();
        assert_eq!(synced.round_id, 2);
        assert_eq!(synced.answer, 3_110_000_000_000);
        assert_eq!(synced.updated_at, T0 + 2);

        assert_eq!(pipeline.proxy.state(), ProxyState::Live);
        assert_eq!(
            pipeline.proxy.latest_round_data().as_tuple(),
            (2, 3_110_000_000_000, T0 + 2, T0 + 2, 2)
        );
        assert_eq!(pipeline.proxy.get_round_data(2).unwrap().answer, 3_110_000_000_000);
    }

    #[test]
    fn test_mirror_tracks_origin_over_many_rounds() {
        let mut pipeline = Pipeline::deploy();
        let answers = [3_110_000_000_000, 2_990_000_000_000, -1, 0, 3_500_000_000_000];

        for answer in answers {
            pipeline.relay_price(answer).unwrap();
            let origin = pipeline.origin.latest_round_data();
            let mirror = pipeline.proxy.latest_round_data();
            assert_eq!(mirror.round_id, origin.round_id);
            assert_eq!(mirror.answer, origin.answer);
            assert_eq!(mirror.updated_at, origin.updated_at);
        }

        assert_eq!(pipeline.relay.stats().callbacks_emitted, answers.len() as u64);
        assert_eq!(pipeline.relay.stats().total_rejected(), 0);
    }

    #[test]
    fn test_read_interfaces_agree() {
        let pipeline = Pipeline::deploy();
        assert_eq!(pipeline.origin.decimals(), pipeline.proxy.decimals());
        assert_eq!(pipeline.origin.version(), pipeline.proxy.version());
        assert_eq!(pipeline.origin.description(), "Mock BTC/USD");
        assert_eq!(pipeline.proxy.description(), "BTC/USD (Reactive Mirror)");
    }

    #[test]
    fn test_proxy_trusts_only_configured_identity() {
        let pipeline = Pipeline::deploy();
        assert_eq!(pipeline.proxy.config().reactive_vm_id, RVM_ID);
    }
}

//! # Runtime Flows
//!
//! The full deployment with its handlers running, observed from the bus the
//! way an indexer on each chain would see it.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use relay_runtime::{OracleRuntime, RuntimeConfig};
    use shared_bus::{EventFilter, EventTopic, OracleEvent, Subscription};
    use shared_types::abi::event_topic;
    use shared_types::constants::{
        CALLBACK_EVENT_SIGNATURE, DESTINATION_CHAIN_ID, ORIGIN_CHAIN_ID, REACTIVE_CHAIN_ID,
    };
    use shared_types::value_objects::{Hash, U256};
    use tokio::time::timeout;

    use crate::fixtures::{PROXY, RVM_ID, T0};

    const WAIT: Duration = Duration::from_secs(2);

    fn started() -> OracleRuntime {
        let runtime = OracleRuntime::new(RuntimeConfig::default()).unwrap();
        runtime.start();
        runtime
    }

    async fn next(subscription: &mut Subscription) -> OracleEvent {
        timeout(WAIT, subscription.recv()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_event_sequence_across_chains() {
        let runtime = started();
        let mut all = runtime.subscribe(EventFilter::all());

        runtime.submit_price(3_110_000_000_000).unwrap();

        match next(&mut all).await {
            OracleEvent::OriginLog(log) => {
                assert_eq!(log.chain_id, ORIGIN_CHAIN_ID);
                assert_eq!(log.block_number, 1);
            }
            other => panic!("expected origin log, got {other:?}"),
        }
        match next(&mut all).await {
            OracleEvent::CallbackRequested { rvm_id, request } => {
                assert_eq!(rvm_id, RVM_ID);
                assert_eq!(request.chain_id, DESTINATION_CHAIN_ID);
                assert_eq!(request.contract, PROXY);
            }
            other => panic!("expected callback request, got {other:?}"),
        }
        match next(&mut all).await {
            OracleEvent::PriceSynced {
                chain_id,
                contract,
                round,
            } => {
                assert_eq!(chain_id, DESTINATION_CHAIN_ID);
                assert_eq!(contract, PROXY);
                assert_eq!(round.as_tuple(), (2, 3_110_000_000_000, T0 + 2, T0 + 2, 2));
            }
            other => panic!("expected price synced, got {other:?}"),
        }

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_callback_log_shape() {
        let runtime = started();
        runtime.submit_price(3_110_000_000_000).unwrap();
        runtime.wait_for_mirror(2, WAIT).await.unwrap();

        let logs = runtime.callback_log();
        assert_eq!(logs.len(), 1);
        let log = &logs[0];
        assert_eq!(log.chain_id, REACTIVE_CHAIN_ID);
        assert_eq!(log.contract, runtime.config().reactive.relay_address);
        assert_eq!(log.topic_0(), Some(event_topic(CALLBACK_EVENT_SIGNATURE)));
        assert_eq!(log.topics[2], Hash::from(PROXY));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_idle_origin_time_carries_into_mirror() {
        let runtime = started();

        runtime.advance_origin(3_600);
        runtime.submit_price(2_950_000_000_000).unwrap();

        let mirrored = runtime.wait_for_mirror(2, WAIT).await.unwrap();
        let origin = runtime.origin_latest();
        assert_eq!(origin.started_at, T0);
        assert_eq!(origin.updated_at, T0 + 3_602);
        assert_eq!(mirrored.updated_at, origin.updated_at);
        assert_eq!(mirrored.started_at, origin.updated_at);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_burst_converges_to_latest() {
        let runtime = started();
        let mut destination = runtime.subscribe(EventFilter::topics(vec![EventTopic::Destination]));

        let answers: Vec<i128> = (1..=20).map(|i| 3_000_000_000_000 + i * 1_000_000).collect();
        for answer in &answers {
            runtime.submit_price(*answer).unwrap();
        }

        let mut synced = Vec::new();
        while synced.len() < answers.len() {
            match next(&mut destination).await {
                OracleEvent::PriceSynced { round, .. } => synced.push(round.round_id),
                other => panic!("unexpected rejection: {other:?}"),
            }
        }
        assert_eq!(synced, (2..=21).collect::<Vec<u64>>());

        let status = runtime.status();
        assert!(status.in_sync());
        assert_eq!(status.mirror_latest.answer, answers[19]);
        assert_eq!(status.relay_stats.callbacks_emitted, 20);
        assert_eq!(status.delivery.synced, 20);
        assert_eq!(status.delivery.reverted, 0);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_negative_answer_is_mirrored() {
        let runtime = started();
        runtime.submit_price(-42).unwrap();

        let mirrored = runtime.wait_for_mirror(2, WAIT).await.unwrap();
        assert_eq!(mirrored.answer, -42);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_status_counts_balances() {
        let runtime = started();
        let before = runtime.status();

        runtime.fund_proxy(U256::from(1_000u64));
        runtime.fund_relay(U256::from(2_000u64));

        let after = runtime.status();
        assert_eq!(after.proxy_balance, before.proxy_balance + U256::from(1_000u64));
        assert_eq!(after.relay_balance, before.relay_balance + U256::from(2_000u64));

        runtime.shutdown().await;
    }
}

//! # Spoofed Origin Logs
//!
//! Logs that look like price updates but do not come from the watched feed
//! on the watched chain, or do not decode. The relay must drop every one of
//! them without reverting and without emitting a callback.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Pipeline, FEED, T0};
    use ro_02_reactive_relay::{ReactiveRelayApi, RejectReason, ValidationOutcome};
    use shared_types::abi::{encode, event_topic, Token};
    use shared_types::constants::{ANSWER_UPDATED_TOPIC, ORIGIN_CHAIN_ID};
    use shared_types::entities::LogRecord;
    use shared_types::feed::AggregatorV3;
    use shared_types::value_objects::{Address, Bytes};

    fn answer_data(answer: i128, round_id: u64, updated_at: u64) -> Bytes {
        Bytes::from_vec(encode(&[
            Token::Int(answer),
            Token::uint(round_id),
            Token::uint(updated_at),
        ]))
    }

    fn forged(chain_id: u64, contract: Address, data: Bytes) -> LogRecord {
        LogRecord::new(chain_id, contract, vec![ANSWER_UPDATED_TOPIC], data)
    }

    fn assert_dropped(pipeline: &mut Pipeline, log: &LogRecord, reason: RejectReason) {
        assert_eq!(
            pipeline.relay.validate(log),
            ValidationOutcome::Rejected(reason)
        );
        let before = pipeline.relay.stats().rejected_for(reason);
        assert!(pipeline.react(log).is_empty());
        assert_eq!(pipeline.relay.stats().rejected_for(reason), before + 1);
    }

    #[test]
    fn test_same_feed_address_on_other_chain() {
        let mut pipeline = Pipeline::deploy();
        let log = forged(1, FEED, answer_data(1, 99, T0));
        assert_dropped(&mut pipeline, &log, RejectReason::WrongChain);
    }

    #[test]
    fn test_lookalike_contract_on_origin_chain() {
        let mut pipeline = Pipeline::deploy();
        let log = forged(
            ORIGIN_CHAIN_ID,
            Address::repeat_byte(0xEE),
            answer_data(1, 99, T0),
        );
        assert_dropped(&mut pipeline, &log, RejectReason::WrongContract);
    }

    #[test]
    fn test_other_event_from_feed() {
        let mut pipeline = Pipeline::deploy();
        let mut log = forged(ORIGIN_CHAIN_ID, FEED, answer_data(1, 99, T0));
        log.topics = vec![event_topic("NewRound(uint256,address,uint256)")];
        assert_dropped(&mut pipeline, &log, RejectReason::WrongTopic);

        log.topics.clear();
        assert_dropped(&mut pipeline, &log, RejectReason::WrongTopic);
    }

    #[test]
    fn test_truncated_payload() {
        let mut pipeline = Pipeline::deploy();
        let mut data = answer_data(1, 99, T0);
        data.0.truncate(64);
        let log = forged(ORIGIN_CHAIN_ID, FEED, data);
        assert_dropped(&mut pipeline, &log, RejectReason::PayloadTooShort);
    }

    #[test]
    fn test_round_id_out_of_range() {
        let mut pipeline = Pipeline::deploy();
        let mut data = answer_data(1, 99, T0);
        // High byte of the roundId word.
        data.0[32] = 0x01;
        let log = forged(ORIGIN_CHAIN_ID, FEED, data);
        assert_dropped(&mut pipeline, &log, RejectReason::Malformed);
    }

    #[test]
    fn test_answer_beyond_int128() {
        let mut pipeline = Pipeline::deploy();
        let mut data = answer_data(1, 99, T0);
        data.0[0] = 0x7f;
        let log = forged(ORIGIN_CHAIN_ID, FEED, data);
        assert_dropped(&mut pipeline, &log, RejectReason::Malformed);
    }

    #[test]
    fn test_spoofing_leaves_mirror_untouched() {
        let mut pipeline = Pipeline::deploy();
        pipeline.relay_price(3_110_000_000_000).unwrap();

        let attacks = [
            forged(1, FEED, answer_data(1, 1_000, T0 + 100)),
            forged(
                ORIGIN_CHAIN_ID,
                Address::repeat_byte(0xEE),
                answer_data(1, 1_000, T0 + 100),
            ),
        ];
        for log in &attacks {
            assert!(pipeline.react(log).is_empty());
        }

        assert_eq!(pipeline.proxy.latest_round_data().round_id, 2);
        assert_eq!(pipeline.relay.stats().total_rejected(), 2);
        assert_eq!(pipeline.relay.stats().callbacks_emitted, 1);
    }
}

//! # Domain Services
//!
//! Pure functions behind `react`: log validation and callback construction.
//!
//! Validation short-circuits in a fixed order so the first failing check is
//! the reported reason:
//!
//! 1. chain id
//! 2. emitting contract
//! 3. topic 0
//! 4. data length (at least three words)
//! 5. ABI decode of `(int256 current, uint256 roundId, uint256 updatedAt)`

use super::entities::RelayConfig;
use super::value_objects::{RejectReason, ValidatedEvent, ValidationOutcome};
use shared_types::abi::AbiDecoder;
use shared_types::callback::{CallbackRequest, UpdatePriceCall};
use shared_types::constants::{domain_separator, ANSWER_UPDATED_DATA_LEN, ANSWER_UPDATED_TOPIC};
use shared_types::entities::LogRecord;
use shared_types::errors::AbiError;
use shared_types::value_objects::{Address, Bytes};

/// Decides whether a delivered log is a genuine origin update.
#[must_use]
pub fn validate_log(config: &RelayConfig, log: &LogRecord) -> ValidationOutcome {
    if log.chain_id != config.origin_chain_id {
        return ValidationOutcome::Rejected(RejectReason::WrongChain);
    }
    if log.contract != config.origin_feed {
        return ValidationOutcome::Rejected(RejectReason::WrongContract);
    }
    let topic_0 = match log.topic_0() {
        Some(topic) if topic == ANSWER_UPDATED_TOPIC => topic,
        _ => return ValidationOutcome::Rejected(RejectReason::WrongTopic),
    };
    if log.data.len() < ANSWER_UPDATED_DATA_LEN {
        return ValidationOutcome::Rejected(RejectReason::PayloadTooShort);
    }

    match decode_answer_updated(log.data.as_slice()) {
        Ok((answer, round_id, updated_at)) => ValidationOutcome::Accepted(ValidatedEvent {
            answer,
            round_id,
            updated_at,
            origin_chain_id: log.chain_id,
            origin_contract: log.contract,
            topic_0,
        }),
        Err(_) => ValidationOutcome::Rejected(RejectReason::Malformed),
    }
}

fn decode_answer_updated(data: &[u8]) -> Result<(i128, u64, u64), AbiError> {
    let mut decoder = AbiDecoder::new(data);
    Ok((
        decoder.read_i128("current")?,
        decoder.read_u64("roundId")?,
        decoder.read_u64("updatedAt")?,
    ))
}

/// Builds the destination callback for an accepted update.
///
/// The identity slot is left as the zero address for the callback
/// infrastructure to fill. The origin event carries no start time, so
/// `startedAt` is passed through as `updatedAt`; the origin answers every
/// round in itself, so `answeredInRound` is the round id.
#[must_use]
pub fn build_callback(config: &RelayConfig, event: &ValidatedEvent) -> CallbackRequest {
    let call = UpdatePriceCall {
        rvm_id: Address::ZERO,
        domain_separator: domain_separator(),
        round_id: event.round_id,
        answer: event.answer,
        started_at: event.updated_at,
        updated_at: event.updated_at,
        answered_in_round: event.round_id,
    };
    CallbackRequest {
        chain_id: config.destination_chain_id,
        contract: config.destination_contract,
        gas_limit: config.callback_gas_limit,
        payload: Bytes::from_vec(call.encode()),
    }
}

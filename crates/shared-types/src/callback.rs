//! # Authenticated Callback Payloads
//!
//! The relay never calls the destination directly. It emits a
//! [`CallbackRequest`] whose payload is complete `updatePrice` calldata; the
//! callback infrastructure overwrites the first argument (the reserved
//! identity slot) with the relay's RVM id before delivering it.
//!
//! ```text
//! [0..4)     selector   updatePrice(address,bytes32,uint80,int256,uint256,uint256,uint80)
//! [4..36)    rvm_id     reserved, emitted as zero
//! [36..68)   domain     keccak256("REACTIVE_ORACLE_V1")
//! [68..100)  roundId
//! [100..132) answer
//! [132..164) startedAt
//! [164..196) updatedAt
//! [196..228) answeredInRound
//! ```

use crate::abi::{self, AbiDecoder, Token, SELECTOR_SIZE, WORD_SIZE};
use crate::constants::{CALLBACK_EVENT_SIGNATURE, UPDATE_PRICE_SIGNATURE};
use crate::entities::{LogRecord, RoundData};
use crate::errors::AbiError;
use crate::value_objects::{Address, Bytes, Hash, U256};
use serde::{Deserialize, Serialize};

/// Byte range of the reserved caller-identity word inside the payload.
pub const IDENTITY_SLOT: std::ops::Range<usize> = SELECTOR_SIZE..SELECTOR_SIZE + WORD_SIZE;

/// Length of well-formed `updatePrice` calldata.
pub const UPDATE_PRICE_CALLDATA_LEN: usize = SELECTOR_SIZE + 7 * WORD_SIZE;

/// Selector of the destination entry point.
#[must_use]
pub fn update_price_selector() -> [u8; 4] {
    abi::function_selector(UPDATE_PRICE_SIGNATURE)
}

// =============================================================================
// UPDATE PRICE CALL
// =============================================================================

/// Decoded arguments of `updatePrice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePriceCall {
    /// Relay identity attested by the callback infrastructure.
    pub rvm_id: Address,
    /// Protocol version tag.
    pub domain_separator: Hash,
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

impl UpdatePriceCall {
    /// The round carried by this call.
    #[must_use]
    pub const fn round(&self) -> RoundData {
        RoundData {
            round_id: self.round_id,
            answer: self.answer,
            started_at: self.started_at,
            updated_at: self.updated_at,
            answered_in_round: self.answered_in_round,
        }
    }

    /// ABI-encodes the call including its selector.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        abi::encode_call(
            update_price_selector(),
            &[
                Token::Address(self.rvm_id),
                Token::FixedBytes(self.domain_separator),
                Token::uint(self.round_id),
                Token::Int(self.answer),
                Token::uint(self.started_at),
                Token::uint(self.updated_at),
                Token::uint(self.answered_in_round),
            ],
        )
    }

    /// Decodes calldata. Every integer must fit its Rust type.
    pub fn decode(calldata: &[u8]) -> Result<Self, AbiError> {
        let mut decoder = AbiDecoder::for_call(calldata, update_price_selector())?;
        Ok(Self {
            rvm_id: decoder.read_address()?,
            domain_separator: decoder.read_bytes32()?,
            round_id: decoder.read_u64("roundId")?,
            answer: decoder.read_i128("answer")?,
            started_at: decoder.read_u64("startedAt")?,
            updated_at: decoder.read_u64("updatedAt")?,
            answered_in_round: decoder.read_u64("answeredInRound")?,
        })
    }
}

// =============================================================================
// CALLBACK REQUEST
// =============================================================================

/// A request for the callback infrastructure to invoke a destination
/// contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    /// Destination chain.
    pub chain_id: u64,
    /// Destination contract.
    pub contract: Address,
    /// Gas budget for the callback.
    pub gas_limit: u64,
    /// Complete calldata.
    pub payload: Bytes,
}

impl CallbackRequest {
    /// Address currently stored in the reserved identity slot.
    #[must_use]
    pub fn reserved_identity(&self) -> Option<Address> {
        let word = self.payload.as_slice().get(IDENTITY_SLOT)?;
        Address::from_slice(&word[12..])
    }

    /// Overwrites the reserved identity slot with `rvm_id`.
    ///
    /// Returns false when the payload is too short to carry the slot.
    pub fn inject_identity(&mut self, rvm_id: Address) -> bool {
        match self.payload.0.get_mut(IDENTITY_SLOT) {
            Some(slot) => {
                slot.copy_from_slice(&rvm_id.to_word());
                true
            }
            None => false,
        }
    }

    /// Renders the well-known `Callback(uint256,address,uint64,bytes)` event
    /// as it appears in the emitter's log.
    #[must_use]
    pub fn to_log(&self, emitter_chain_id: u64, emitter: Address) -> LogRecord {
        let topics = vec![
            abi::event_topic(CALLBACK_EVENT_SIGNATURE),
            Hash::new(abi::uint_word(U256::from(self.chain_id))),
            Hash::from(self.contract),
            Hash::new(abi::uint_word(U256::from(self.gas_limit))),
        ];
        let data = abi::encode(&[Token::Bytes(self.payload.as_slice().to_vec())]);
        LogRecord::new(emitter_chain_id, emitter, topics, Bytes::from_vec(data))
    }
}

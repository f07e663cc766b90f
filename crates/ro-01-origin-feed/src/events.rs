//! # Events
//!
//! Logs emitted by the origin feed.
//!
//! ## Wire Format
//!
//! `AnswerUpdated(int256 current, uint256 roundId, uint256 updatedAt)` with
//! **no indexed arguments**: topic 0 is the signature hash and all three
//! values are ABI words in the data section. Watchers must decode the data,
//! not the topics.

use serde::{Deserialize, Serialize};
use shared_types::abi::{self, Token};
use shared_types::constants::ANSWER_UPDATED_TOPIC;
use shared_types::entities::{BlockContext, LogRecord, RoundData};
use shared_types::value_objects::{Address, Bytes};

/// Change notification emitted once per submitted round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerUpdated {
    /// The new answer.
    pub current: i128,
    /// The round that was written.
    pub round_id: u64,
    /// When it was written.
    pub updated_at: u64,
}

impl AnswerUpdated {
    /// Event for a freshly written round.
    #[must_use]
    pub fn for_round(round: &RoundData) -> Self {
        Self {
            current: round.answer,
            round_id: round.round_id,
            updated_at: round.updated_at,
        }
    }

    /// ABI-encoded data section.
    #[must_use]
    pub fn encode_data(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Int(self.current),
            Token::uint(self.round_id),
            Token::uint(self.updated_at),
        ])
    }

    /// The raw log the chain records for this event.
    #[must_use]
    pub fn to_log(&self, chain_id: u64, contract: Address, block: &BlockContext) -> LogRecord {
        let data = self.encode_data();
        let mut preimage = block.number.to_be_bytes().to_vec();
        preimage.extend_from_slice(contract.as_bytes());
        preimage.extend_from_slice(&data);
        let tx_hash = abi::keccak256(&preimage);

        LogRecord::new(
            chain_id,
            contract,
            vec![ANSWER_UPDATED_TOPIC],
            Bytes::from_vec(data),
        )
        .at_block(block, tx_hash, 0)
    }
}

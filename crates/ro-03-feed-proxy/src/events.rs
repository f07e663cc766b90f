//! # Events
//!
//! Logs emitted by the feed proxy.

use serde::{Deserialize, Serialize};
use shared_types::abi::{self, Token};
use shared_types::constants::PRICE_SYNCED_SIGNATURE;
use shared_types::entities::{LogRecord, RoundData};
use shared_types::value_objects::{Address, Bytes, Hash, U256};

/// Emitted once per accepted update.
///
/// `PriceSynced(uint80 indexed roundId, int256 answer, uint256 updatedAt)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSynced {
    /// The accepted round.
    pub round_id: u64,
    /// Its answer.
    pub answer: i128,
    /// Its origin update time.
    pub updated_at: u64,
}

impl PriceSynced {
    /// Event for a freshly accepted round.
    #[must_use]
    pub fn for_round(round: &RoundData) -> Self {
        Self {
            round_id: round.round_id,
            answer: round.answer,
            updated_at: round.updated_at,
        }
    }

    /// The raw log the destination chain records for this event.
    #[must_use]
    pub fn to_log(&self, chain_id: u64, contract: Address) -> LogRecord {
        let topics = vec![
            abi::event_topic(PRICE_SYNCED_SIGNATURE),
            Hash::new(abi::uint_word(U256::from(self.round_id))),
        ];
        let data = abi::encode(&[Token::Int(self.answer), Token::uint(self.updated_at)]);
        LogRecord::new(chain_id, contract, topics, Bytes::from_vec(data))
    }
}

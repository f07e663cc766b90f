//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Price data**: `RoundData`
//! - **Chain observations**: `LogRecord`
//! - **Execution**: `BlockContext`, `CallContext`, `ExecutionEnvironment`

use crate::value_objects::{Address, Bytes, Hash, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: PRICE DATA
// =============================================================================

/// One price observation, in the Chainlink `latestRoundData` shape.
///
/// Both the origin feed and the feed proxy own their own instances; the
/// record is never shared between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundData {
    /// Round identifier. 0 means "no round recorded".
    pub round_id: u64,
    /// Price with `FEED_DECIMALS` fixed-point decimals.
    pub answer: i128,
    /// When the round began accumulating.
    pub started_at: u64,
    /// When the answer was finalized.
    pub updated_at: u64,
    /// Round in which the answer was last confirmed.
    pub answered_in_round: u64,
}

impl RoundData {
    /// The zero-valued placeholder returned before any round exists.
    #[must_use]
    pub const fn empty(started_at: u64) -> Self {
        Self {
            round_id: 0,
            answer: 0,
            started_at,
            updated_at: 0,
            answered_in_round: 0,
        }
    }

    /// The `(roundId, answer, startedAt, updatedAt, answeredInRound)` tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (u64, i128, u64, u64, u64) {
        (
            self.round_id,
            self.answer,
            self.started_at,
            self.updated_at,
            self.answered_in_round,
        )
    }

    /// True when this is the zero placeholder.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.round_id == 0
    }
}

// =============================================================================
// CLUSTER B: CHAIN OBSERVATIONS
// =============================================================================

/// A raw log as recorded by a chain and forwarded by the dispatch
/// infrastructure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Chain that recorded the log.
    pub chain_id: u64,
    /// Contract that emitted the log.
    pub contract: Address,
    /// Topic 0 is the event signature hash; up to three indexed args follow.
    pub topics: Vec<Hash>,
    /// Non-indexed event data.
    pub data: Bytes,
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: Hash,
    /// Transaction hash.
    pub tx_hash: Hash,
    /// Position of the log in its block.
    pub log_index: u64,
}

impl LogRecord {
    /// Creates a log with zeroed block coordinates.
    #[must_use]
    pub fn new(chain_id: u64, contract: Address, topics: Vec<Hash>, data: Bytes) -> Self {
        Self {
            chain_id,
            contract,
            topics,
            data,
            block_number: 0,
            block_hash: Hash::ZERO,
            tx_hash: Hash::ZERO,
            log_index: 0,
        }
    }

    /// Stamps the block coordinates the log was recorded at.
    #[must_use]
    pub fn at_block(mut self, block: &BlockContext, tx_hash: Hash, log_index: u64) -> Self {
        self.block_number = block.number;
        self.block_hash = block.hash;
        self.tx_hash = tx_hash;
        self.log_index = log_index;
        self
    }

    /// Topic 0 (the event signature hash), if present.
    #[must_use]
    pub fn topic_0(&self) -> Option<Hash> {
        self.topics.first().copied()
    }
}

// =============================================================================
// CLUSTER C: EXECUTION
// =============================================================================

/// Block-level information visible to a contract call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    /// Chain the block belongs to.
    pub chain_id: u64,
    /// Block number.
    pub number: u64,
    /// Block timestamp (unix seconds).
    pub timestamp: u64,
    /// Block hash.
    pub hash: Hash,
}

impl BlockContext {
    /// Creates a block context with a zero hash.
    #[must_use]
    pub const fn new(chain_id: u64, number: u64, timestamp: u64) -> Self {
        Self {
            chain_id,
            number,
            timestamp,
            hash: Hash::ZERO,
        }
    }
}

/// Where a reactive contract copy is executing.
///
/// The same relay is deployed twice: once on the reactive network, where it
/// registers subscriptions and can be paid, and once inside its private
/// ReactVM, where the dispatch infrastructure delivers matching logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionEnvironment {
    /// An ordinary chain (origin, destination, or the reactive network itself).
    #[default]
    Network,
    /// The isolated reactive VM driven by the dispatch infrastructure.
    ReactiveVm,
}

/// Caller-visible context of one contract invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// `msg.sender`.
    pub sender: Address,
    /// `msg.value`.
    pub value: U256,
    /// Current block.
    pub block: BlockContext,
    /// Execution environment.
    pub environment: ExecutionEnvironment,
}

impl CallContext {
    /// A plain call without value on an ordinary chain.
    #[must_use]
    pub fn new(sender: Address, block: BlockContext) -> Self {
        Self {
            sender,
            value: U256::zero(),
            block,
            environment: ExecutionEnvironment::Network,
        }
    }

    /// Attaches a value transfer.
    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Marks the call as executing inside the reactive VM.
    #[must_use]
    pub fn in_reactive_vm(mut self) -> Self {
        self.environment = ExecutionEnvironment::ReactiveVm;
        self
    }

    /// Block timestamp shortcut.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.block.timestamp
    }
}

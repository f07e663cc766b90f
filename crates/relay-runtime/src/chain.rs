//! # Simulated Chains
//!
//! A chain here is only a clock: a block number and a timestamp that move
//! forward together. Contracts read both through the `BlockContext` of each
//! call.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::abi::keccak256;
use shared_types::entities::{BlockContext, CallContext};
use shared_types::value_objects::Address;

/// A chain clock shared by everything that executes on that chain.
pub type SharedChain = Arc<Mutex<SimulatedChain>>;

/// Block clock of one simulated chain.
#[derive(Debug, Clone)]
pub struct SimulatedChain {
    chain_id: u64,
    number: u64,
    timestamp: u64,
    block_time_secs: u64,
}

impl SimulatedChain {
    /// A chain at block 0 with the given genesis timestamp.
    pub fn new(chain_id: u64, genesis_timestamp: u64, block_time_secs: u64) -> Self {
        Self {
            chain_id,
            number: 0,
            timestamp: genesis_timestamp,
            block_time_secs,
        }
    }

    /// Wraps the clock for sharing.
    pub fn shared(self) -> SharedChain {
        Arc::new(Mutex::new(self))
    }

    /// Chain id.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The current head.
    pub fn block(&self) -> BlockContext {
        let mut preimage = Vec::with_capacity(16);
        preimage.extend_from_slice(&self.chain_id.to_be_bytes());
        preimage.extend_from_slice(&self.number.to_be_bytes());

        let mut block = BlockContext::new(self.chain_id, self.number, self.timestamp);
        block.hash = keccak256(&preimage);
        block
    }

    /// Produces one block `secs` after the current head and returns it.
    pub fn advance(&mut self, secs: u64) -> BlockContext {
        self.number += 1;
        self.timestamp = self.timestamp.saturating_add(secs);
        self.block()
    }

    /// Produces one block at the regular block time.
    pub fn next_block(&mut self) -> BlockContext {
        self.advance(self.block_time_secs)
    }

    /// A call from `sender` in the current head.
    pub fn ctx(&self, sender: Address) -> CallContext {
        CallContext::new(sender, self.block())
    }
}

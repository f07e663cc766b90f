//! # Protocol Constants
//!
//! Identifiers fixed by the deployed protocol. Contracts copy the ones they
//! need into immutable configuration at construction time.

use crate::abi::keccak256;
use crate::value_objects::{Address, Hash};

/// Origin chain (Polygon Amoy).
pub const ORIGIN_CHAIN_ID: u64 = 80_002;

/// Destination chain (Ethereum Sepolia).
pub const DESTINATION_CHAIN_ID: u64 = 11_155_111;

/// Reactive network hosting the relay (Lasna testnet).
pub const REACTIVE_CHAIN_ID: u64 = 5_318_007;

/// Change-notification event emitted by a price ledger.
/// All three fields are non-indexed.
pub const ANSWER_UPDATED_SIGNATURE: &str = "AnswerUpdated(int256,uint256,uint256)";

/// `keccak256(ANSWER_UPDATED_SIGNATURE)`.
pub const ANSWER_UPDATED_TOPIC: Hash = Hash::new([
    0x05, 0x59, 0x88, 0x4f, 0xd3, 0xa4, 0x60, 0xdb, 0x30, 0x73, 0xb7, 0xfc, 0x89, 0x6c, 0xc7, 0x79,
    0x86, 0xf1, 0x6e, 0x37, 0x82, 0x10, 0xde, 0xd4, 0x31, 0x86, 0x17, 0x5b, 0xf6, 0x46, 0xfc, 0x5f,
]);

/// Minimum data length of an `AnswerUpdated` log: three ABI words.
pub const ANSWER_UPDATED_DATA_LEN: usize = 3 * 32;

/// Well-known event the reactive network watches for callback requests.
/// `chain_id`, `_contract` and `gas_limit` are indexed; `payload` is data.
pub const CALLBACK_EVENT_SIGNATURE: &str = "Callback(uint256,address,uint64,bytes)";

/// Destination entry point invoked by the callback infrastructure.
pub const UPDATE_PRICE_SIGNATURE: &str =
    "updatePrice(address,bytes32,uint80,int256,uint256,uint256,uint80)";

/// Local notification emitted by the feed proxy on an accepted update.
pub const PRICE_SYNCED_SIGNATURE: &str = "PriceSynced(uint80,int256,uint256)";

/// Version string hashed into the domain separator.
pub const DOMAIN_TAG: &str = "REACTIVE_ORACLE_V1";

/// Fixed gas budget requested for every destination callback.
pub const CALLBACK_GAS_LIMIT: u64 = 500_000;

/// Smallest callback gas limit the callback infrastructure will execute.
pub const MIN_CALLBACK_GAS_LIMIT: u64 = 100_000;

/// Reactive network system contract (Lasna).
pub const SYSTEM_CONTRACT: Address = Address::new([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff,
]);

/// Callback proxy on the destination chain (Sepolia).
pub const CALLBACK_PROXY: Address = Address::new([
    0xc9, 0xf3, 0x64, 0x11, 0xc9, 0x89, 0x7e, 0x7f, 0x95, 0x9d, 0x99, 0xff, 0xca, 0x2a, 0x0b, 0xa7,
    0xee, 0x0d, 0x7b, 0xda,
]);

/// Wildcard topic for reactive subscriptions ("match any value").
pub const REACTIVE_IGNORE: Hash = Hash::new([
    0xa6, 0x5f, 0x96, 0xfc, 0x95, 0x1c, 0x35, 0xea, 0xd3, 0x88, 0x78, 0xe0, 0xf0, 0xb7, 0xa3, 0xc7,
    0x44, 0xa6, 0xf5, 0xcc, 0xc1, 0x47, 0x6b, 0x31, 0x33, 0x53, 0xce, 0x31, 0x71, 0x23, 0x13, 0xad,
]);

/// Fixed-point decimals of every feed in this domain.
pub const FEED_DECIMALS: u8 = 8;

/// Read-interface version reported by both feeds.
pub const FEED_VERSION: u64 = 1;

/// `keccak256(DOMAIN_TAG)`.
#[must_use]
pub fn domain_separator() -> Hash {
    keccak256(DOMAIN_TAG.as_bytes())
}

//! # Runtime Configuration
//!
//! Chain ids, contract addresses and delivery behaviour for one simulated
//! deployment. Defaults describe the Amoy → Lasna → Sepolia deployment;
//! every field an operator is expected to change can be overridden from the
//! environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `RO_ORIGIN_CHAIN_ID` | `origin.chain_id` |
//! | `RO_DEST_CHAIN_ID` | `destination.chain_id` |
//! | `RO_ORIGIN_FEED` | `origin.feed_address` |
//! | `RO_FEED_PROXY` | `destination.proxy_address` |
//! | `RO_RVM_ID` | `reactive.rvm_id` |
//! | `RO_CALLBACK_GAS_LIMIT` | `reactive.callback_gas_limit` |
//! | `RO_INITIAL_PRICE` | `origin.initial_answer` (`none` disables seeding) |
//! | `RO_DUPLICATE_DELIVERIES` | `delivery.duplicate_deliveries` |
//! | `RO_REQUIRE_FUNDING` | `delivery.require_funding` |

use ro_01_origin_feed::DEFAULT_DESCRIPTION as ORIGIN_DESCRIPTION;
use ro_03_feed_proxy::DEFAULT_DESCRIPTION as PROXY_DESCRIPTION;
use shared_types::constants::{
    CALLBACK_GAS_LIMIT, CALLBACK_PROXY, DESTINATION_CHAIN_ID, MIN_CALLBACK_GAS_LIMIT,
    ORIGIN_CHAIN_ID, REACTIVE_CHAIN_ID, SYSTEM_CONTRACT,
};
use shared_types::value_objects::{Address, U256};
use thiserror::Error;

/// Deployer of the relay; doubles as its ReactVM id.
pub const DEFAULT_RVM_ID: Address = Address::new([
    0xf0, 0x92, 0xae, 0x8e, 0xb8, 0x9f, 0x9d, 0x1d, 0xde, 0x19, 0xb8, 0x04, 0x47, 0xde, 0x5b, 0x15,
    0x28, 0xd1, 0x7a, 0xe5,
]);

/// Relay address on the reactive network.
pub const DEFAULT_RELAY_ADDRESS: Address = Address::new([
    0x63, 0x19, 0x4c, 0x2c, 0x46, 0xee, 0x67, 0xf5, 0x70, 0x2f, 0x9d, 0x87, 0x7e, 0x12, 0x5b, 0x99,
    0x2b, 0x90, 0xf4, 0x1e,
]);

/// Feed proxy address on the destination chain.
pub const DEFAULT_PROXY_ADDRESS: Address = Address::new([
    0xae, 0x7b, 0xff, 0x83, 0x7c, 0x0e, 0x6d, 0xf3, 0x0c, 0x33, 0x7c, 0xda, 0xa0, 0xf2, 0xe4, 0x6f,
    0x32, 0x30, 0x9d, 0x57,
]);

/// Origin feed address used when none is configured.
pub const DEFAULT_ORIGIN_FEED: Address = Address::repeat_byte(0x0f);

/// $30,000 with 8 decimals.
pub const DEFAULT_INITIAL_ANSWER: i128 = 3_000_000_000_000;

/// Genesis timestamp shared by all simulated chains.
pub const DEFAULT_GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Timestamp of block 0 on every simulated chain.
    pub genesis_timestamp: u64,
    /// Origin chain and feed.
    pub origin: OriginChainConfig,
    /// Reactive network and relay.
    pub reactive: ReactiveConfig,
    /// Destination chain and proxy.
    pub destination: DestinationConfig,
    /// Callback delivery behaviour.
    pub delivery: DeliveryConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            genesis_timestamp: DEFAULT_GENESIS_TIMESTAMP,
            origin: OriginChainConfig::default(),
            reactive: ReactiveConfig::default(),
            destination: DestinationConfig::default(),
            delivery: DeliveryConfig::default(),
        }
    }
}

/// Origin chain configuration.
#[derive(Debug, Clone)]
pub struct OriginChainConfig {
    /// Chain id of the origin chain.
    pub chain_id: u64,
    /// Address the origin feed is deployed at.
    pub feed_address: Address,
    /// Seed round written at deployment, if any.
    pub initial_answer: Option<i128>,
    /// Feed description.
    pub description: String,
    /// Seconds between blocks.
    pub block_time_secs: u64,
}

impl Default for OriginChainConfig {
    fn default() -> Self {
        Self {
            chain_id: ORIGIN_CHAIN_ID,
            feed_address: DEFAULT_ORIGIN_FEED,
            initial_answer: Some(DEFAULT_INITIAL_ANSWER),
            description: ORIGIN_DESCRIPTION.to_string(),
            block_time_secs: 2,
        }
    }
}

/// Reactive network configuration.
#[derive(Debug, Clone)]
pub struct ReactiveConfig {
    /// Chain id of the reactive network.
    pub chain_id: u64,
    /// Relay deployer, and therefore the relay's ReactVM id.
    pub rvm_id: Address,
    /// Address the relay is deployed at.
    pub relay_address: Address,
    /// System contract allowed to settle the relay's debt.
    pub system_contract: Address,
    /// Gas budget requested for every callback.
    pub callback_gas_limit: u64,
    /// Value sent with the relay deployment.
    pub initial_funding: U256,
    /// Seconds between blocks.
    pub block_time_secs: u64,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            chain_id: REACTIVE_CHAIN_ID,
            rvm_id: DEFAULT_RVM_ID,
            relay_address: DEFAULT_RELAY_ADDRESS,
            system_contract: SYSTEM_CONTRACT,
            callback_gas_limit: CALLBACK_GAS_LIMIT,
            initial_funding: U256::exp10(17),
            block_time_secs: 1,
        }
    }
}

/// Destination chain configuration.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    /// Chain id of the destination chain.
    pub chain_id: u64,
    /// Address the feed proxy is deployed at.
    pub proxy_address: Address,
    /// Callback proxy that delivers relay callbacks.
    pub callback_proxy: Address,
    /// Proxy description.
    pub description: String,
    /// Value sent with the proxy deployment.
    pub initial_funding: U256,
    /// Seconds between blocks.
    pub block_time_secs: u64,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            chain_id: DESTINATION_CHAIN_ID,
            proxy_address: DEFAULT_PROXY_ADDRESS,
            callback_proxy: CALLBACK_PROXY,
            description: PROXY_DESCRIPTION.to_string(),
            initial_funding: U256::exp10(16),
            block_time_secs: 12,
        }
    }
}

/// Callback delivery behaviour.
#[derive(Debug, Clone, Default)]
pub struct DeliveryConfig {
    /// Deliver every callback twice.
    pub duplicate_deliveries: bool,
    /// Refuse to execute callbacks while the proxy holds no balance.
    pub require_funding: bool,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// A required address is zero.
    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),

    /// Origin and destination share a chain id.
    #[error("origin and destination must be different chains (both {0})")]
    SameChain(u64),

    /// Callback gas limit below what the callback proxy executes.
    #[error("callback gas limit {configured} below minimum {minimum}")]
    GasLimitTooLow {
        /// Configured limit.
        configured: u64,
        /// Minimum accepted by the callback proxy.
        minimum: u64,
    },
}

impl RuntimeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden from `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("RO_ORIGIN_CHAIN_ID") {
            config.origin.chain_id = parse_number("RO_ORIGIN_CHAIN_ID", &v)?;
        }
        if let Some(v) = lookup("RO_DEST_CHAIN_ID") {
            config.destination.chain_id = parse_number("RO_DEST_CHAIN_ID", &v)?;
        }
        if let Some(v) = lookup("RO_ORIGIN_FEED") {
            config.origin.feed_address = parse_address("RO_ORIGIN_FEED", &v)?;
        }
        if let Some(v) = lookup("RO_FEED_PROXY") {
            config.destination.proxy_address = parse_address("RO_FEED_PROXY", &v)?;
        }
        if let Some(v) = lookup("RO_RVM_ID") {
            config.reactive.rvm_id = parse_address("RO_RVM_ID", &v)?;
        }
        if let Some(v) = lookup("RO_CALLBACK_GAS_LIMIT") {
            config.reactive.callback_gas_limit = parse_number("RO_CALLBACK_GAS_LIMIT", &v)?;
        }
        if let Some(v) = lookup("RO_INITIAL_PRICE") {
            config.origin.initial_answer = if v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_number("RO_INITIAL_PRICE", &v)?)
            };
        }
        if let Some(v) = lookup("RO_DUPLICATE_DELIVERIES") {
            config.delivery.duplicate_deliveries = parse_flag("RO_DUPLICATE_DELIVERIES", &v)?;
        }
        if let Some(v) = lookup("RO_REQUIRE_FUNDING") {
            config.delivery.require_funding = parse_flag("RO_REQUIRE_FUNDING", &v)?;
        }

        Ok(config)
    }

    /// Rejects configurations no deployment could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origin.feed_address.is_zero() {
            return Err(ConfigError::ZeroAddress("origin feed"));
        }
        if self.destination.proxy_address.is_zero() {
            return Err(ConfigError::ZeroAddress("feed proxy"));
        }
        if self.destination.callback_proxy.is_zero() {
            return Err(ConfigError::ZeroAddress("callback proxy"));
        }
        if self.reactive.rvm_id.is_zero() {
            return Err(ConfigError::ZeroAddress("ReactVM id"));
        }
        if self.origin.chain_id == self.destination.chain_id {
            return Err(ConfigError::SameChain(self.origin.chain_id));
        }
        if self.reactive.callback_gas_limit < MIN_CALLBACK_GAS_LIMIT {
            return Err(ConfigError::GasLimitTooLow {
                configured: self.reactive.callback_gas_limit,
                minimum: MIN_CALLBACK_GAS_LIMIT,
            });
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_address(key: &'static str, value: &str) -> Result<Address, ConfigError> {
    let raw = value.trim();
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(raw).map_err(|_| invalid(key, value))?;
    Address::from_slice(&bytes).ok_or_else(|| invalid(key, value))
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

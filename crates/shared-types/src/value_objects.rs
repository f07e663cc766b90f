//! # Value Objects
//!
//! Byte-level primitives of the EVM chains the relay connects: addresses,
//! 32-byte words and raw log or call data.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;

/// Shared surface of the fixed-width byte newtypes.
macro_rules! fixed_bytes {
    ($name:ident, $len:literal) => {
        impl $name {
            /// All zero bytes.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Wraps raw bytes.
            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Copies `slice` when it has exactly the right length.
            #[must_use]
            pub fn from_slice(slice: &[u8]) -> Option<Self> {
                <[u8; $len]>::try_from(slice).ok().map(Self)
            }

            /// Parses hex, `0x` prefix optional, any letter case.
            #[must_use]
            pub fn from_hex(s: &str) -> Option<Self> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                Self::from_slice(&hex::decode(digits).ok()?)
            }

            /// The raw bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// True when every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        // Abbreviated for log lines: first four and last two bytes.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "0x{}..{}",
                    hex::encode(&self.0[..4]),
                    hex::encode(&self.0[$len - 2..])
                )
            }
        }
    };
}

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

fixed_bytes!(Address, 20);

impl Address {
    /// An address with every byte set to `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// The address as an ABI word: twelve zero bytes, then the address.
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }
}

/// A 32-byte word: Keccak-256 digests, log topics, `bytes32` arguments.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

fixed_bytes!(Hash, 32);

impl Hash {
    /// The word read as a big-endian unsigned integer.
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }
}

/// An indexed address topic is the address left-padded to a word.
impl From<Address> for Hash {
    fn from(addr: Address) -> Self {
        Self(addr.to_word())
    }
}

/// Variable-length data: log data sections and calldata.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Empty data.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Takes ownership of `vec`.
    #[must_use]
    pub fn from_vec(vec: Vec<u8>) -> Self {
        Self(vec)
    }

    /// Unwraps the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Borrowed view.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Calldata is 228 bytes; print the selector and first word only.
        match self.0.get(..36) {
            Some(head) if self.0.len() > 64 => {
                write!(f, "0x{}..({} bytes)", hex::encode(head), self.0.len())
            }
            _ => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

//! # ABI Word Codec
//!
//! Minimal Solidity ABI encoding for the static types the relay protocol
//! moves across chains, plus the single dynamic `bytes` argument of the
//! `Callback` event.
//!
//! Every value occupies one 32-byte big-endian word. Decoding is strict:
//! a word whose value does not fit the Rust type it is read into is a
//! [`AbiError::ValueOutOfRange`], never a silent truncation.

use crate::errors::AbiError;
use crate::value_objects::{Address, Hash, U256};
use sha3::{Digest, Keccak256};

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;

/// Size of a function selector.
pub const SELECTOR_SIZE: usize = 4;

// =============================================================================
// HASHING
// =============================================================================

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

/// Topic 0 of an event: the hash of its canonical signature.
#[must_use]
pub fn event_topic(signature: &str) -> Hash {
    keccak256(signature.as_bytes())
}

/// First four bytes of the hash of a function signature.
#[must_use]
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.0[..4]);
    selector
}

// =============================================================================
// ENCODING
// =============================================================================

/// A single ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Unsigned integer of any width up to 256 bits.
    Uint(U256),
    /// Signed integer, sign-extended to 256 bits.
    Int(i128),
    /// 20-byte address, left-padded.
    Address(Address),
    /// `bytes32`.
    FixedBytes(Hash),
    /// Dynamic `bytes`, encoded through an offset into the tail.
    Bytes(Vec<u8>),
}

impl Token {
    /// Convenience constructor for small unsigned values.
    #[must_use]
    pub fn uint(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }

    fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }
}

/// Encodes a signed integer as a two's-complement 256-bit word.
#[must_use]
pub fn int_word(value: i128) -> [u8; 32] {
    let mut word = if value < 0 { [0xffu8; 32] } else { [0u8; 32] };
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes an unsigned integer as a 256-bit word.
#[must_use]
pub fn uint_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// ABI-encodes a tuple of tokens (head/tail layout).
#[must_use]
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        let word = match token {
            Token::Uint(value) => uint_word(*value),
            Token::Int(value) => int_word(*value),
            Token::Address(addr) => addr.to_word(),
            Token::FixedBytes(hash) => hash.0,
            Token::Bytes(bytes) => {
                let offset = head_len + tail.len();
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                let padding = (WORD_SIZE - bytes.len() % WORD_SIZE) % WORD_SIZE;
                tail.extend(std::iter::repeat(0u8).take(padding));
                uint_word(U256::from(offset))
            }
        };
        head.extend_from_slice(&word);
    }

    debug_assert!(tokens.iter().any(Token::is_dynamic) || tail.is_empty());
    head.extend_from_slice(&tail);
    head
}

/// ABI-encodes a function call: selector followed by the encoded arguments.
#[must_use]
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut calldata = Vec::with_capacity(SELECTOR_SIZE + tokens.len() * WORD_SIZE);
    calldata.extend_from_slice(&selector);
    calldata.extend_from_slice(&encode(tokens));
    calldata
}

// =============================================================================
// DECODING
// =============================================================================

/// Sequential reader over ABI words.
#[derive(Debug)]
pub struct AbiDecoder<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> AbiDecoder<'a> {
    /// Creates a decoder over encoded arguments (no selector).
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Creates a decoder over calldata after checking its selector.
    pub fn for_call(calldata: &'a [u8], selector: [u8; 4]) -> Result<Self, AbiError> {
        if calldata.len() < SELECTOR_SIZE {
            return Err(AbiError::InsufficientData {
                needed: SELECTOR_SIZE,
                available: calldata.len(),
            });
        }
        let mut found = [0u8; 4];
        found.copy_from_slice(&calldata[..SELECTOR_SIZE]);
        if found != selector {
            return Err(AbiError::SelectorMismatch {
                expected: selector,
                found,
            });
        }
        Ok(Self::new(&calldata[SELECTOR_SIZE..]))
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn next_word(&mut self) -> Result<&'a [u8], AbiError> {
        let end = self.cursor + WORD_SIZE;
        if end > self.data.len() {
            return Err(AbiError::InsufficientData {
                needed: end,
                available: self.data.len(),
            });
        }
        let word = &self.data[self.cursor..end];
        self.cursor = end;
        Ok(word)
    }

    /// Reads a full 256-bit unsigned word.
    pub fn read_u256(&mut self) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(self.next_word()?))
    }

    /// Reads an unsigned integer that must fit in 64 bits.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, AbiError> {
        let word = self.next_word()?;
        if word[..24].iter().any(|b| *b != 0) {
            return Err(AbiError::ValueOutOfRange { field });
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&word[24..]);
        Ok(u64::from_be_bytes(low))
    }

    /// Reads a signed integer that must fit in 128 bits.
    ///
    /// The upper 16 bytes must be a pure sign extension of the lower 16.
    pub fn read_i128(&mut self, field: &'static str) -> Result<i128, AbiError> {
        let word = self.next_word()?;
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        let value = i128::from_be_bytes(low);
        let extension = if value < 0 { 0xffu8 } else { 0u8 };
        if word[..16].iter().any(|b| *b != extension) {
            return Err(AbiError::ValueOutOfRange { field });
        }
        Ok(value)
    }

    /// Reads an address word; the 12 padding bytes must be zero.
    pub fn read_address(&mut self) -> Result<Address, AbiError> {
        let word = self.next_word()?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(AbiError::DirtyAddressPadding);
        }
        Address::from_slice(&word[12..]).ok_or(AbiError::DirtyAddressPadding)
    }

    /// Reads a `bytes32` word.
    pub fn read_bytes32(&mut self) -> Result<Hash, AbiError> {
        let word = self.next_word()?;
        Hash::from_slice(word).ok_or(AbiError::InsufficientData {
            needed: WORD_SIZE,
            available: word.len(),
        })
    }
}

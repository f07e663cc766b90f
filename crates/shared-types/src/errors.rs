//! # Error Types
//!
//! Errors shared by every contract crate.

use thiserror::Error;

/// ABI decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Fewer bytes than the next word requires.
    #[error("Insufficient data: need {needed} bytes, have {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A word does not fit the integer type it is decoded into.
    #[error("Value out of range for field {field}")]
    ValueOutOfRange { field: &'static str },

    /// The 12 high bytes of an address word are not zero.
    #[error("Address word has non-zero padding")]
    DirtyAddressPadding,

    /// Calldata targets a different function.
    #[error(
        "Selector mismatch: expected 0x{}, found 0x{}",
        hex::encode(.expected),
        hex::encode(.found)
    )]
    SelectorMismatch { expected: [u8; 4], found: [u8; 4] },
}

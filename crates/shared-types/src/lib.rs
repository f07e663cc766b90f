//! # Shared Types Crate
//!
//! Primitives shared by the origin feed, the reactive relay and the feed
//! proxy: value objects, round and log entities, the ABI word codec, the
//! authenticated callback payload and the protocol constants.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a chain boundary is
//!   defined here.
//! - **Strict Decoding**: wire values that do not fit their Rust type are
//!   errors, never truncations.
//! - **No Shared State**: contracts only exchange values, never references.

pub mod abi;
pub mod callback;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod feed;
pub mod value_objects;

pub use callback::{CallbackRequest, UpdatePriceCall};
pub use entities::*;
pub use errors::*;
pub use feed::AggregatorV3;
pub use value_objects::*;

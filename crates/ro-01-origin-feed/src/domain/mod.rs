//! # Domain Module
//!
//! Core domain types for the origin price ledger.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;

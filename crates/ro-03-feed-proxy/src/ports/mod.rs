//! # Ports Module
//!
//! Hexagonal architecture ports. The proxy only receives calls; it has no
//! outbound dependencies.

pub mod inbound;

pub use inbound::*;

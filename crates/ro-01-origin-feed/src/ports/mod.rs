//! # Ports Module
//!
//! Hexagonal architecture ports. The origin feed has no outbound
//! dependencies: it only records rounds and returns the event to emit.

pub mod inbound;

pub use inbound::*;

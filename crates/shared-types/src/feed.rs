//! # Aggregator Read Interface
//!
//! The Chainlink `AggregatorV3Interface` read surface. Both the origin
//! ledger and the destination proxy implement it, so downstream consumers
//! can read either one without knowing which side of the bridge they are on.

use crate::entities::RoundData;

/// Read-only price feed.
pub trait AggregatorV3 {
    /// Lookup failure (unknown round).
    type Error: std::error::Error;

    /// Fixed-point decimals of `answer`.
    fn decimals(&self) -> u8;

    /// Human-readable feed name.
    fn description(&self) -> &str;

    /// Interface version.
    fn version(&self) -> u64;

    /// Most recent round. Never fails; returns the zero placeholder before
    /// the first round.
    fn latest_round_data(&self) -> RoundData;

    /// A specific round.
    fn get_round_data(&self, round_id: u64) -> Result<RoundData, Self::Error>;
}

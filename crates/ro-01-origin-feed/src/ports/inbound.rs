//! # Driving Ports (API - Inbound)
//!
//! The write surface of the origin feed. The read surface is the shared
//! `AggregatorV3` interface.

use crate::domain::OriginFeedError;
use crate::events::AnswerUpdated;
use shared_types::entities::{CallContext, RoundData};
use shared_types::feed::AggregatorV3;

/// Origin feed API.
pub trait OriginFeedApi: AggregatorV3<Error = OriginFeedError> {
    /// Records a new round at the current block time. Open to any caller.
    fn submit_price(
        &mut self,
        ctx: &CallContext,
        answer: i128,
    ) -> Result<AnswerUpdated, OriginFeedError>;

    /// Number of rounds written.
    fn round_count(&self) -> u64;

    /// Every round, oldest first.
    fn history(&self) -> Vec<RoundData>;
}

//! # Origin Feed Service
//!
//! A Chainlink-compatible mock aggregator: any caller may push a new answer,
//! and each push writes a new round and emits `AnswerUpdated`.

use crate::domain::{OriginFeedConfig, OriginFeedError, RoundLedger};
use crate::events::AnswerUpdated;
use crate::ports::inbound::OriginFeedApi;
use shared_types::entities::{CallContext, RoundData};
use shared_types::feed::AggregatorV3;
use tracing::{debug, info, instrument};

/// The origin price ledger.
#[derive(Clone, Debug)]
pub struct OriginFeed {
    config: OriginFeedConfig,
    ledger: RoundLedger,
}

impl OriginFeed {
    /// Deploys an empty feed.
    #[must_use]
    pub fn new(config: OriginFeedConfig, ctx: &CallContext) -> Self {
        debug!(
            description = %config.description,
            deployed_at = ctx.timestamp(),
            "Origin feed deployed"
        );
        Self {
            config,
            ledger: RoundLedger::new(ctx.timestamp()),
        }
    }

    /// Deploys a feed seeded with round 1 at the construction time.
    ///
    /// Seeding writes storage directly; no `AnswerUpdated` is emitted, so
    /// watchers first observe round 2.
    pub fn with_initial_answer(
        config: OriginFeedConfig,
        ctx: &CallContext,
        answer: i128,
    ) -> Result<Self, OriginFeedError> {
        let mut feed = Self::new(config, ctx);
        feed.ledger.append(answer, ctx.timestamp())?;
        info!(answer, "Origin feed seeded with round 1");
        Ok(feed)
    }

    /// The deployment parameters.
    #[must_use]
    pub fn config(&self) -> &OriginFeedConfig {
        &self.config
    }
}

impl AggregatorV3 for OriginFeed {
    type Error = OriginFeedError;

    fn decimals(&self) -> u8 {
        self.config.decimals
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn version(&self) -> u64 {
        self.config.version
    }

    fn latest_round_data(&self) -> RoundData {
        self.ledger.latest()
    }

    fn get_round_data(&self, round_id: u64) -> Result<RoundData, OriginFeedError> {
        self.ledger
            .get(round_id)
            .ok_or(OriginFeedError::RoundNotFound(round_id))
    }
}

impl OriginFeedApi for OriginFeed {
    #[instrument(skip(self, ctx), fields(sender = %ctx.sender))]
    fn submit_price(
        &mut self,
        ctx: &CallContext,
        answer: i128,
    ) -> Result<AnswerUpdated, OriginFeedError> {
        let round = self.ledger.append(answer, ctx.timestamp())?;
        info!(
            round_id = round.round_id,
            answer = round.answer,
            updated_at = round.updated_at,
            "Price submitted"
        );
        Ok(AnswerUpdated::for_round(&round))
    }

    fn round_count(&self) -> u64 {
        self.ledger.len() as u64
    }

    fn history(&self) -> Vec<RoundData> {
        self.ledger.rounds().to_vec()
    }
}

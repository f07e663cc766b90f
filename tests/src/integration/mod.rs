//! # Integration Flows
//!
//! Origin updates travelling to the destination mirror, first with the
//! contracts called directly, then through the runtime's bus and handlers.

pub mod contract_pipeline;
pub mod runtime_flows;

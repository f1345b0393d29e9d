//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file; helpers they share live in `common`.

pub mod common;
pub mod deals;
pub mod insights;

pub use common::{DealIdParams, NoParams};
pub use deals::{
    CreateDealParams, CreateDealTool, GetDealTool, ListOpenDealsTool, UpdateDealParams,
    UpdateDealTool,
};
pub use insights::{
    PrioritizeDealsTool, ScoreDealTool, SuggestNextActionTool, SummarizePipelineTool,
};

//! Deals domain module.
//!
//! This module holds the sales pipeline itself: the `Deal` record, the
//! storage back-ends that hold deals, and the pure scoring functions that
//! derive close probability, risk, priority and recommended actions.
//!
//! ## Architecture
//!
//! - `model.rs` - The `Deal` record and update payloads
//! - `scoring.rs` - Close probability, risk level, priority, recommendations
//! - `pipeline.rs` - Pipeline-wide aggregation and ranking
//! - `store/` - The `DealStore` contract with SQLite and in-memory back-ends
//!
//! Tools and resources only ever talk to a `DealStore` trait object, so the
//! scoring logic is shared by every back-end.

pub mod model;
pub mod pipeline;
pub mod scoring;
pub mod store;

pub use model::{
    DEAL_NOT_FOUND, Deal, DealSummary, DealUpdate, STAGE_DISCOVERY, STAGE_NEGOTIATION,
    STAGE_PROPOSAL,
};
pub use pipeline::{PipelineSummary, RankedDeal, prioritize_deals, summarize_pipeline};
pub use scoring::{
    DealScore, Priority, Recommendation, RiskLevel, calculate_score, recommend, score_deal,
};
pub use store::{DealStore, InMemoryDealStore, SqliteDealStore, StoreError, StoreResult, open_store};

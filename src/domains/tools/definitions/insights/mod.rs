//! Derived-insight tools: scoring, recommendations, ranking and summary.

pub mod next_action;
pub mod prioritize;
pub mod score;
pub mod summarize;

pub use next_action::SuggestNextActionTool;
pub use prioritize::PrioritizeDealsTool;
pub use score::ScoreDealTool;
pub use summarize::SummarizePipelineTool;

//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool creates its own route; every route shares the same deal store.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    CreateDealTool, GetDealTool, ListOpenDealsTool, PrioritizeDealsTool, ScoreDealTool,
    SuggestNextActionTool, SummarizePipelineTool, UpdateDealTool,
};
use crate::domains::deals::DealStore;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(store: Arc<dyn DealStore>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListOpenDealsTool::create_route(store.clone()))
        .with_route(GetDealTool::create_route(store.clone()))
        .with_route(CreateDealTool::create_route(store.clone()))
        .with_route(UpdateDealTool::create_route(store.clone()))
        .with_route(ScoreDealTool::create_route(store.clone()))
        .with_route(SuggestNextActionTool::create_route(store.clone()))
        .with_route(PrioritizeDealsTool::create_route(store.clone()))
        .with_route(SummarizePipelineTool::create_route(store))
}

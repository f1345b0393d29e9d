//! Suggest next action tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{DealIdParams, json_result, store_route, tool_model, with_deal};
use crate::domains::deals::{DealStore, recommend};

/// Suggest next action tool - priority and follow-up actions for one deal.
pub struct SuggestNextActionTool;

impl SuggestNextActionTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "suggest_next_action";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Suggest the next best sales actions for a deal, \
        with a priority derived from its value.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(deal_id = %params.deal_id))]
    pub fn execute(params: &DealIdParams, store: &dyn DealStore) -> CallToolResult {
        with_deal(store, &params.deal_id, |deal| {
            let recommendation = recommend(deal);
            info!(
                "Suggested {} action(s) for {}",
                recommendation.recommended_actions.len(),
                recommendation.deal_id
            );
            json_result(&recommendation)
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        store: Arc<dyn DealStore>,
    ) -> Result<serde_json::Value, String> {
        super::super::common::http_call(arguments, store.as_ref(), Self::execute)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<DealIdParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<dyn DealStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        store_route(Self::to_tool(), store, Self::execute)
    }
}

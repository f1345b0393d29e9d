//! Get deal tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{DealIdParams, json_result, store_route, tool_model, with_deal};
use crate::domains::deals::DealStore;

/// Get deal tool - returns the full record of one deal.
pub struct GetDealTool;

impl GetDealTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_deal";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the full record of a deal: company, value, stage, days in pipeline and days since last contact.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(deal_id = %params.deal_id))]
    pub fn execute(params: &DealIdParams, store: &dyn DealStore) -> CallToolResult {
        info!("Get deal tool called for {}", params.deal_id);
        with_deal(store, &params.deal_id, json_result)
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

//! Prioritize deals tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{NoParams, json_result, store_error_result, store_route, tool_model};
use crate::domains::deals::{DealStore, prioritize_deals};

/// Prioritize deals tool - every deal ranked by close probability.
pub struct PrioritizeDealsTool;

impl PrioritizeDealsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "prioritize_deals";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Rank all deals by close probability, highest first.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &NoParams, store: &dyn DealStore) -> CallToolResult {
        match store.get_all_deals() {
            Ok(deals) => {
                let ranked = prioritize_deals(&deals);
                info!("Ranked {} deals", ranked.len());
                json_result(&ranked)
            }
            Err(e) => store_error_result(&e),
        }
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
        tool_model::<NoParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<dyn DealStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        store_route(Self::to_tool(), store, Self::execute)
    }
}

//! Update deal tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{json_result, store_error_result, store_route, tool_model};
use crate::domains::deals::{DealStore, DealUpdate};

/// Parameters for the update_deal tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDealParams {
    #[schemars(description = "Identifier of the deal to update")]
    pub deal_id: String,

    #[schemars(description = "New company name")]
    pub company: String,

    #[schemars(description = "New monetary value")]
    pub value: u64,

    #[schemars(description = "New pipeline stage")]
    pub stage: String,

    /// Replaces the pipeline age when given.
    #[schemars(description = "Optional: days since the deal entered the pipeline")]
    #[serde(default)]
    pub days_in_pipeline: Option<u32>,

    /// Replaces the contact age when given.
    #[schemars(description = "Optional: days since the last client contact")]
    #[serde(default)]
    pub last_contact_days: Option<u32>,
}

impl UpdateDealParams {
    fn to_update(&self) -> DealUpdate {
        DealUpdate {
            days_in_pipeline: self.days_in_pipeline,
            last_contact_days: self.last_contact_days,
            ..DealUpdate::new(self.company.clone(), self.value, self.stage.clone())
        }
    }
}

/// Update deal tool - overwrites company, value and stage of an existing deal.
pub struct UpdateDealTool;

impl UpdateDealTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_deal";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update an existing deal's company, value and stage. \
        Aging counters are only changed when provided.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(deal_id = %params.deal_id))]
    pub fn execute(params: &UpdateDealParams, store: &dyn DealStore) -> CallToolResult {
        match store.update_deal(&params.deal_id, &params.to_update()) {
            Ok(deal) => {
                info!("Updated deal {} (stage: {})", deal.deal_id, deal.stage);
                json_result(&serde_json::json!({
                    "status": "Deal updated",
                    "deal_id": deal.deal_id
                }))
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
        tool_model::<UpdateDealParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<dyn DealStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        store_route(Self::to_tool(), store, Self::execute)
    }
}

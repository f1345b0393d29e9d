//! Create deal tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{json_result, store_error_result, store_route, tool_model};
use crate::domains::deals::{Deal, DealStore};

/// Parameters for the create_deal tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDealParams {
    /// Identifier of the new deal.
    #[schemars(description = "Unique identifier for the new deal")]
    pub deal_id: String,

    /// Client company.
    #[schemars(description = "Name of the client company")]
    pub company: String,

    /// Monetary value.
    #[schemars(description = "Monetary value of the deal")]
    pub value: u64,

    /// Pipeline stage.
    #[schemars(description = "Pipeline stage, e.g. 'Discovery', 'Proposal' or 'Negotiation'")]
    pub stage: String,
}

impl From<&CreateDealParams> for Deal {
    fn from(params: &CreateDealParams) -> Self {
        Deal::new(
            params.deal_id.clone(),
            params.company.clone(),
            params.value,
            params.stage.clone(),
        )
    }
}

/// Create deal tool - inserts a new deal with both aging counters at zero.
pub struct CreateDealTool;

impl CreateDealTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_deal";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new deal in the pipeline. \
        The deal starts with zero days in pipeline and zero days since last contact.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(deal_id = %params.deal_id))]
    pub fn execute(params: &CreateDealParams, store: &dyn DealStore) -> CallToolResult {
        let deal = Deal::from(params);

        match store.create_deal(&deal) {
            Ok(()) => {
                info!("Created deal {} for {}", deal.deal_id, deal.company);
                json_result(&serde_json::json!({
                    "status": "Deal created",
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
        tool_model::<CreateDealParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<dyn DealStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        store_route(Self::to_tool(), store, Self::execute)
    }
}

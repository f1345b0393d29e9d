//! Score deal tool definition.

use rmcp::{
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{DealIdParams, json_result, store_route, tool_model, with_deal};
use crate::domains::deals::{DealStore, score_deal};

/// Score deal tool - close probability and risk level of one deal.
pub struct ScoreDealTool;

impl ScoreDealTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "score_deal";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Score a deal's likelihood to close. \
        Returns the close probability and a risk level of Low, Medium or High.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(deal_id = %params.deal_id))]
    pub fn execute(params: &DealIdParams, store: &dyn DealStore) -> CallToolResult {
        with_deal(store, &params.deal_id, |deal| {
            let score = score_deal(deal);
            info!(
                "Deal {} scored {} ({:?} risk)",
                score.deal_id, score.close_probability, score.risk_level
            );
            json_result(&score)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::*;

    fn params(deal_id: &str) -> DealIdParams {
        DealIdParams {
            deal_id: deal_id.to_string(),
        }
    }

    #[test]
    fn test_score_stale_negotiation() {
        let result = ScoreDealTool::execute(&params("D-1"), seeded_store().as_ref());
        assert_eq!(
            structured(&result),
            &serde_json::json!({
                "deal_id": "D-1",
                "company": "Acme",
                "close_probability": 75,
                "risk_level": "Medium"
            })
        );
    }

    #[test]
    fn test_score_fresh_deal() {
        let result = ScoreDealTool::execute(&params("D-2"), seeded_store().as_ref());
        assert_eq!(structured(&result)["close_probability"], 100);
        assert_eq!(structured(&result)["risk_level"], "Low");
    }

    #[test]
    fn test_score_missing_deal() {
        let result = ScoreDealTool::execute(&params("nope"), seeded_store().as_ref());
        assert!(is_error(&result));
        assert_eq!(structured(&result)["error"], "Deal not found");
    }
}

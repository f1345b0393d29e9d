//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{
    CreateDealTool, GetDealTool, ListOpenDealsTool, PrioritizeDealsTool, ScoreDealTool,
    SuggestNextActionTool, SummarizePipelineTool, UpdateDealTool,
};
use crate::domains::deals::DealStore;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    store: Arc<dyn DealStore>,
}

impl ToolRegistry {
    /// Create a new tool registry over a deal store.
    pub fn new(store: Arc<dyn DealStore>) -> Self {
        Self { store }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListOpenDealsTool::NAME,
            GetDealTool::NAME,
            CreateDealTool::NAME,
            UpdateDealTool::NAME,
            ScoreDealTool::NAME,
            SuggestNextActionTool::NAME,
            PrioritizeDealsTool::NAME,
            SummarizePipelineTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListOpenDealsTool::to_tool(),
            GetDealTool::to_tool(),
            CreateDealTool::to_tool(),
            UpdateDealTool::to_tool(),
            ScoreDealTool::to_tool(),
            SuggestNextActionTool::to_tool(),
            PrioritizeDealsTool::to_tool(),
            SummarizePipelineTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let store = self.store.clone();
        let result = match name {
            ListOpenDealsTool::NAME => ListOpenDealsTool::http_handler(arguments, store),
            GetDealTool::NAME => GetDealTool::http_handler(arguments, store),
            CreateDealTool::NAME => CreateDealTool::http_handler(arguments, store),
            UpdateDealTool::NAME => UpdateDealTool::http_handler(arguments, store),
            ScoreDealTool::NAME => ScoreDealTool::http_handler(arguments, store),
            SuggestNextActionTool::NAME => SuggestNextActionTool::http_handler(arguments, store),
            PrioritizeDealsTool::NAME => PrioritizeDealsTool::http_handler(arguments, store),
            SummarizePipelineTool::NAME => SummarizePipelineTool::http_handler(arguments, store),
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };
        result.map_err(ToolError::invalid_arguments)
    }
}

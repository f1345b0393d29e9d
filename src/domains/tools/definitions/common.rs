//! Helpers shared by the deal tools.
//!
//! Every tool answers with JSON rendered into `content`. Object values are
//! also carried in `structured_content`, which MCP requires to be an object;
//! lists travel as text only. Failures use an `{"error": ...}` object with
//! `is_error` set.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::deals::{DEAL_NOT_FOUND, Deal, DealStore, StoreError};

/// Signature shared by every tool's `execute`.
pub type ExecuteFn<P> = fn(&P, &dyn DealStore) -> CallToolResult;

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for tools that operate on a single deal.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DealIdParams {
    /// Identifier of the deal.
    #[schemars(description = "Identifier of the deal (e.g. 'D-1001')")]
    pub deal_id: String,
}

/// Build a successful result carrying `value` as JSON.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_value(value) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(render(&value))],
            structured_content: value.is_object().then_some(value),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize tool result: {}", e);
            error_result(format!("Failed to serialize result: {}", e))
        }
    }
}

/// Build an error result of the form `{"error": message}`.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    let structured = serde_json::json!({ "error": message.into() });
    CallToolResult {
        content: vec![Content::text(render(&structured))],
        structured_content: Some(structured),
        is_error: Some(true),
        meta: None,
    }
}

/// Map a store failure to a tool result, passing its message through.
pub fn store_error_result(err: &StoreError) -> CallToolResult {
    if err.is_not_found() {
        return error_result(DEAL_NOT_FOUND);
    }
    warn!("Deal store error: {}", err);
    error_result(err.to_string())
}

/// Resolve a deal and hand it to `f`, or report "Deal not found".
pub fn with_deal(
    store: &dyn DealStore,
    deal_id: &str,
    f: impl FnOnce(&Deal) -> CallToolResult,
) -> CallToolResult {
    match store.get_deal(deal_id) {
        Ok(Some(deal)) => f(&deal),
        Ok(None) => {
            warn!("Deal not found: {}", deal_id);
            error_result(DEAL_NOT_FOUND)
        }
        Err(e) => store_error_result(&e),
    }
}

fn render(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Deserialize tool arguments received over rmcp.
pub fn parse_arguments<P: DeserializeOwned>(args: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Create a Tool model whose input schema is derived from `P`.
pub fn tool_model<P: JsonSchema + 'static>(
    name: &'static str,
    description: &'static str,
) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a ToolRoute (STDIO/TCP transport) that parses `P` and runs
/// `execute` against the store.
pub fn store_route<S, P>(
    tool: Tool,
    store: Arc<dyn DealStore>,
    execute: ExecuteFn<P>,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let store = store.clone();
        async move {
            let params: P = parse_arguments(args)?;
            Ok(execute(&params, store.as_ref()))
        }
        .boxed()
    })
}

/// Run a tool for the HTTP transport and shape the JSON-RPC result.
#[cfg(feature = "http")]
pub fn http_call<P: DeserializeOwned>(
    arguments: serde_json::Value,
    store: &dyn DealStore,
    execute: ExecuteFn<P>,
) -> Result<serde_json::Value, String> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::json!({}),
        other => other,
    };
    let params: P =
        serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

    let result = execute(&params, store);

    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });
    if let (Some(structured), Some(obj)) = (result.structured_content, response.as_object_mut()) {
        obj.insert("structuredContent".to_string(), structured);
    }

    Ok(response)
}

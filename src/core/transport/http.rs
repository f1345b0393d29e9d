//! HTTP transport implementation.
//!
//! JSON-RPC 2.0 over `POST {rpc_path}`, plus `GET /health` and an index at
//! `GET /`. Each request is handled independently; there is no session.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::SERVER_INSTRUCTIONS;

/// MCP protocol revision spoken by the HTTP transport.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve HTTP until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router for the given server and config.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let state = AppState {
        server,
        rpc_path: config.rpc_path.clone(),
    };

    let mut app = Router::new()
        .route(&config.rpc_path, post(handle_rpc))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "store": state.server.store().backend(),
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", request.method.as_str());

    if request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    info!("Received JSON-RPC request: {}", request.method);
    let response = process_request(&state, request).await;
    (StatusCode::OK, Json(response)).into_response()
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    let JsonRpcRequest {
        id, method, params, ..
    } = request;
    let server = &state.server;

    let outcome = match method.as_str() {
        "initialize" => Ok(initialize_result(server)),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => Ok(serde_json::json!({ "tools": server.list_tools() })),
        "tools/call" => match required_str(&params, "name") {
            Ok(name) => server.call_tool(&name, argument_value(&params)).await,
            Err(e) => Err(e),
        },
        "resources/list" => Ok(serde_json::json!({ "resources": server.list_resources().await })),
        "resources/templates/list" => Ok(serde_json::json!({
            "resourceTemplates": server.list_resource_templates().await
        })),
        "resources/read" => match required_str(&params, "uri") {
            Ok(uri) => server.read_resource(&uri).await,
            Err(e) => Err(e),
        },
        "prompts/list" => Ok(serde_json::json!({ "prompts": server.list_prompts().await })),
        "prompts/get" => match required_str(&params, "name") {
            Ok(name) => {
                let arguments = params.as_ref().and_then(|p| p.get("arguments")).cloned();
                server.get_prompt(&name, arguments).await
            }
            Err(e) => Err(e),
        },
        _ => {
            warn!("Unknown method: {}", method);
            return JsonRpcResponse::method_not_found(id);
        }
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(message) => JsonRpcResponse::invalid_params(id, message),
    }
}

fn initialize_result(server: &McpServer) -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": SERVER_INSTRUCTIONS
    })
}

fn required_str(params: &Option<Value>, key: &str) -> Result<String, String> {
    let params = params.as_ref().ok_or_else(|| "Missing params".to_string())?;
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("Missing '{}'", key))
}

fn argument_value(params: &Option<Value>) -> Value {
    params
        .as_ref()
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::deals::{Deal, DealStore, InMemoryDealStore, STAGE_DISCOVERY};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<dyn DealStore>) {
        let store: Arc<dyn DealStore> = Arc::new(InMemoryDealStore::from_deals(vec![
            Deal::new("D-1", "Acme", 50_000, STAGE_DISCOVERY).with_age(45, 10),
        ]));
        let server = McpServer::new(Config::default(), store.clone());
        (build_router(server, &HttpConfig::default()), store)
    }

    async fn rpc(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::post("/mcp")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_initialize() {
        let (app, _) = test_app();
        let (status, body) = rpc(
            app,
            serde_json::json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["serverInfo"]["name"], "sales-mcp-server");
        assert_eq!(body["result"]["instructions"], SERVER_INSTRUCTIONS);
    }

    #[tokio::test]
    async fn test_tools_call_score() {
        let (app, _) = test_app();
        let (_, body) = rpc(
            app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": { "name": "score_deal", "arguments": { "deal_id": "D-1" } }
            }),
        )
        .await;
        assert_eq!(body["result"]["structuredContent"]["close_probability"], 65);
        assert_eq!(body["result"]["structuredContent"]["risk_level"], "Medium");
    }

    #[tokio::test]
    async fn test_tools_call_create_is_visible_to_later_calls() {
        let (app, store) = test_app();
        let (_, body) = rpc(
            app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "create_deal",
                    "arguments": {
                        "deal_id": "D-2",
                        "company": "Globex",
                        "value": 12000,
                        "stage": "Proposal"
                    }
                }
            }),
        )
        .await;
        assert_eq!(body["result"]["structuredContent"]["status"], "Deal created");
        assert!(store.get_deal("D-2").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let (app, _) = test_app();
        let (_, body) = rpc(
            app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": { "name": "close_deal" }
            }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(body["error"]["message"], "Unknown tool: close_deal");
    }

    #[tokio::test]
    async fn test_resources_read_summary() {
        let (app, _) = test_app();
        let (_, body) = rpc(
            app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "resources/read",
                "params": { "uri": "sales://pipeline/summary" }
            }),
        )
        .await;
        let text = body["result"]["contents"][0]["text"].as_str().unwrap();
        let summary: Value = serde_json::from_str(text).unwrap();
        assert_eq!(summary["total_deals"], 1);
    }

    #[tokio::test]
    async fn test_notification_is_accepted_without_body() {
        let (app, _) = test_app();
        let (status, body) = rpc(
            app,
            serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_method_and_bad_version() {
        let (app, _) = test_app();
        let (_, body) = rpc(
            app.clone(),
            serde_json::json!({ "jsonrpc": "2.0", "id": 6, "method": "deals/close" }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32601);

        let (_, body) = rpc(
            app,
            serde_json::json!({ "jsonrpc": "1.0", "id": 7, "method": "tools/list" }),
        )
        .await;
        assert_eq!(body["error"]["code"], -32600);
    }
}

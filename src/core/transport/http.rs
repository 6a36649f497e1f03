//! HTTP transport: stateless JSON-RPC 2.0 over `POST`.
//!
//! Each request is answered on its own, there is no session to initialize
//! first. Notifications are acknowledged with `202 Accepted` and no body.
//! `GET /health` reports liveness.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::ServerHandler;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::McpServer;

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcRequest {
    fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Tool failures keep their code and diagnostics on the wire.
impl From<rmcp::ErrorData> for RpcError {
    fn from(error: rmcp::ErrorData) -> Self {
        Self {
            code: error.code.0,
            message: error.message.into_owned(),
            data: error.data,
        }
    }
}

impl RpcResponse {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failed(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }

    fn err(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self::failed(
            id,
            RpcError {
                code,
                message: message.into(),
                data: None,
            },
        )
    }
}

pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health))
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let listen = &self.config.listen;
        let listener = tokio::net::TcpListener::bind((listen.host.as_str(), listen.port))
            .await
            .map_err(|e| TransportError::bind(listen, e))?;

        info!(
            "Listening for JSON-RPC on http://{}{} (CORS {})",
            listen,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, self.router(server))
            .await
            .map_err(|e| TransportError::Serve(e.to_string()))
    }
}

async fn health(State(server): State<McpServer>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "server": server.name(),
        "version": server.version(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn handle_rpc(State(server): State<McpServer>, Json(request): Json<RpcRequest>) -> Response {
    match dispatch(&server, request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Answer one request; `None` for notifications.
async fn dispatch(server: &McpServer, request: RpcRequest) -> Option<RpcResponse> {
    if request.is_notification() {
        debug!("Notification: {}", request.method);
        return None;
    }

    let id = request.id.clone().unwrap_or(Value::Null);
    if request.jsonrpc != "2.0" {
        return Some(RpcResponse::err(id, INVALID_REQUEST, "jsonrpc must be \"2.0\""));
    }

    debug!("JSON-RPC request: {}", request.method);
    let response = match request.method.as_str() {
        "initialize" => initialize(server, id),
        "ping" => RpcResponse::ok(id, json!({})),
        "tools/list" => RpcResponse::ok(id, json!({ "tools": server.list_tools() })),
        "tools/call" => call_tool(server, id, request.params).await,
        other => {
            warn!("Unsupported method: {}", other);
            RpcResponse::err(id, METHOD_NOT_FOUND, format!("method not found: {}", other))
        }
    };
    Some(response)
}

fn initialize(server: &McpServer, id: Value) -> RpcResponse {
    match serde_json::to_value(server.get_info()) {
        Ok(info) => RpcResponse::ok(id, info),
        Err(e) => RpcResponse::err(id, INTERNAL_ERROR, e.to_string()),
    }
}

async fn call_tool(server: &McpServer, id: Value, params: Option<Value>) -> RpcResponse {
    let params = params.unwrap_or_else(|| json!({}));
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return RpcResponse::err(id, INVALID_PARAMS, "tools/call requires a tool name");
    };
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.call_tool(name, arguments).await {
        Ok(result) => RpcResponse::ok(id, result),
        Err(e) => {
            warn!("Tool '{}' failed: {}", name, e.message);
            RpcResponse::failed(id, e.into())
        }
    }
}

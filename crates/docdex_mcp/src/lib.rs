//! MCP (Model Context Protocol) server implementation
//!
//! This crate provides the JSON-RPC server that exposes the `get_docs` tool
//! to AI agent hosts.
//!
//! CRITICAL: stdout is reserved EXCLUSIVELY for JSON-RPC responses.
//! All logs (Info/Warn/Error) MUST go to stderr to avoid protocol corruption.

use docdex_common::DocdexError;
use docdex_config::Config;
use docdex_core::DocsService;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub mod tools;

/// MCP protocol version this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Convert DocdexError to a JSON-RPC error
    pub fn from_docdex_error(err: &DocdexError) -> Self {
        let code = match err {
            DocdexError::UnsupportedLibrary { .. } => -32602, // Invalid params
            DocdexError::ValidationError(_) => -32602,
            DocdexError::JsonError(_) => -32700, // Parse error
            _ => -32603, // Internal error
        };

        let data = match err {
            DocdexError::UnsupportedLibrary { library } => Some(json!({
                "library": library
            })),
            _ => None,
        };

        Self {
            code,
            message: err.to_string(),
            data,
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }
}

/// The docdex MCP server
///
/// Wraps a [`DocsService`] and dispatches JSON-RPC requests to it.
pub struct McpServer {
    service: DocsService,
}

impl McpServer {
    /// Build a server around an existing service
    pub fn new(service: DocsService) -> Self {
        Self { service }
    }

    /// Build a server from configuration, reading the API key from the
    /// environment
    pub fn from_config(config: &Config) -> docdex_common::Result<Self> {
        let service = DocsService::new(config, Config::api_key())?;
        Ok(Self::new(service))
    }

    /// Handle a single JSON-RPC request
    ///
    /// Returns `None` for notifications (no id, or a `notifications/*`
    /// method), which must not receive a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Log to stderr only
        tracing::info!(target: "mcp", method = %request.method, "Handling MCP request");

        if request.method.starts_with("notifications/") {
            return None;
        }
        let id = request.id?;

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools::list_tools(self.service.registry())),
            "tools/call" => self.handle_tools_call(request.params).await,
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        let response = match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: Some(id),
                result: Some(value),
                error: None,
            },
            Err(e) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: Some(id),
                result: None,
                error: Some(e),
            },
        };
        Some(response)
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "docdex",
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        #[derive(Deserialize)]
        struct ToolCallParams {
            name: String,
            #[serde(default)]
            arguments: Option<Value>,
        }

        let params: ToolCallParams = params
            .ok_or_else(|| DocdexError::ValidationError("Missing params".to_string()))
            .and_then(|v| {
                serde_json::from_value(v)
                    .map_err(|e| DocdexError::ValidationError(format!("Invalid params: {}", e)))
            })
            .map_err(|e| JsonRpcError::from_docdex_error(&e))?;

        match params.name.as_str() {
            tools::GET_DOCS => tools::handle_get_docs(&self.service, params.arguments)
                .await
                .map_err(|e| JsonRpcError::from_docdex_error(&e)),
            other => Err(JsonRpcError {
                code: -32602,
                message: format!("Unknown tool: {}", other),
                data: None,
            }),
        }
    }
}

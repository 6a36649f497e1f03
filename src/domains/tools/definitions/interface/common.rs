//! Common utilities shared across the interface tools.
//!
//! Input validation runs before any client is built, so a rejected call
//! never reaches the network.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::yapi::{HttpMethod, YapiClient};

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Parse raw tool arguments into the tool's parameter struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, McpError> {
    serde_json::from_value(arguments).map_err(|e| {
        McpError::invalid_params(format!("parameter validation failed: {}", e), None)
    })
}

/// Open a client for the duration of one tool call.
pub fn connect(operation: &'static str, config: &Config) -> Result<YapiClient, ToolError> {
    YapiClient::new(&config.yapi).map_err(|e| ToolError::from_yapi(operation, e))
}

pub fn ensure_positive(field: &str, value: i64) -> Result<(), ToolError> {
    if value < 1 {
        return Err(ToolError::validation(format!("{} must be >= 1, got {}", field, value)));
    }
    Ok(())
}

pub fn ensure_path(path: &str) -> Result<(), ToolError> {
    if !path.starts_with('/') {
        return Err(ToolError::validation("interface path must start with /"));
    }
    Ok(())
}

pub fn ensure_title(title: &str) -> Result<(), ToolError> {
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(ToolError::validation(format!(
            "title must be 1-{} characters, got {}",
            MAX_TITLE_CHARS, len
        )));
    }
    Ok(())
}

pub fn parse_method(method: &str) -> Result<HttpMethod, ToolError> {
    method.parse().map_err(ToolError::Validation)
}

/// Success result: pretty JSON text plus structured content.
pub fn json_result<T: Serialize, S: Serialize>(
    operation: &'static str,
    text: &T,
    structured: &S,
) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(text)
        .map_err(|e| ToolError::operation_failed(operation, e))?;
    let structured =
        serde_json::to_value(structured).map_err(|e| ToolError::operation_failed(operation, e))?;

    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    })
}

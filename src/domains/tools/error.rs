//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::domains::yapi::{NormalizedError, YapiError, map_classified_failure};

/// Errors a tool call can end with.
///
/// Every variant is produced exactly once at the tool boundary; a value
/// that is already a `ToolError` is passed on as-is.
#[derive(Debug, Error)]
pub enum ToolError {
    /// YApi rejected the call (HTTP status or embedded errcode).
    #[error("{0}")]
    Remote(NormalizedError),

    /// Input rejected before any request was made.
    #[error("parameter validation failed: {0}")]
    Validation(String),

    /// Anything else, prefixed with the operation that failed.
    #[error("{operation} failed: {message}")]
    OperationFailed {
        operation: &'static str,
        message: String,
    },
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new operation failure.
    pub fn operation_failed(operation: &'static str, msg: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation,
            message: msg.to_string(),
        }
    }

    /// Classify a client failure for the given operation.
    pub fn from_yapi(operation: &'static str, error: YapiError) -> Self {
        match error {
            YapiError::Status {
                status,
                http_status,
                errcode,
                body,
            } => Self::Remote(map_classified_failure(status, http_status, errcode, &body)),
            YapiError::Validation(msg) => Self::Validation(msg),
            other => Self::operation_failed(operation, other),
        }
    }

    /// Convert into the MCP error returned to the client.
    pub fn into_mcp_error(self) -> McpError {
        match self {
            Self::Remote(normalized) => normalized.into_mcp_error(),
            Self::Validation(_) => McpError::invalid_params(self.to_string(), None),
            Self::OperationFailed { .. } => McpError::internal_error(self.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::yapi::FailureKind;

    #[test]
    fn test_status_errors_are_mapped() {
        let err = ToolError::from_yapi("get", YapiError::http_status(401, ""));
        match &err {
            ToolError::Remote(n) => assert_eq!(n.kind, FailureKind::AuthFailed),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.into_mcp_error().code.0, -32001);
    }

    #[test]
    fn test_embedded_errors_are_mapped() {
        let body = r#"{"errcode":490,"errmsg":"不存在的"}"#;
        let err = ToolError::from_yapi("get", YapiError::embedded(200, 490, body));
        let mcp = err.into_mcp_error();
        assert_eq!(mcp.code.0, -32002);
        assert_eq!(mcp.message, "resource not found: 不存在的");

        let data = mcp.data.unwrap();
        assert_eq!(data["httpStatus"], 200);
        assert_eq!(data["errcode"], 490);
    }

    #[test]
    fn test_validation_prefix() {
        let err = ToolError::from_yapi("save", YapiError::validation("missing required fields for create: title"));
        assert_eq!(
            err.to_string(),
            "parameter validation failed: missing required fields for create: title"
        );
        assert_eq!(err.into_mcp_error().code.0, -32602);
    }

    #[test]
    fn test_other_errors_get_operation_prefix() {
        let err = ToolError::from_yapi("search", YapiError::decode("missing data"));
        assert_eq!(err.to_string(), "search failed: unexpected response: missing data");
        assert_eq!(err.into_mcp_error().code.0, -32603);
    }
}

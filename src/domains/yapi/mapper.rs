//! Translation of failed YApi calls into normalized tool errors.
//!
//! The mapping is a pure function of the status a failure is classified
//! under and the response body. The resulting code is always one of [`FailureKind`]'s fixed values and is
//! never a pass-through of the upstream status.

use rmcp::ErrorData as McpError;
use serde_json::{Map, Value};

/// How many characters of a non-JSON body are kept for diagnostics.
const RAW_TEXT_LIMIT: usize = 200;

/// Remote-originated failure classes and their fixed MCP error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AuthFailed,
    NotFound,
    Forbidden,
    ServerError,
    InvalidParams,
}

impl FailureKind {
    pub fn code(&self) -> i32 {
        match self {
            Self::AuthFailed => -32001,
            Self::NotFound => -32002,
            Self::Forbidden => -32003,
            Self::ServerError => -32000,
            Self::InvalidParams => -32602,
        }
    }
}

/// A failure ready to be handed to the calling agent.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedError {
    pub kind: FailureKind,
    pub message: String,
    pub diagnostics: Map<String, Value>,
}

impl NormalizedError {
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Convert into the MCP error channel, diagnostics travel as `data`.
    pub fn into_mcp_error(self) -> McpError {
        McpError::new(
            rmcp::model::ErrorCode(self.kind.code()),
            self.message,
            Some(Value::Object(self.diagnostics)),
        )
    }
}

impl std::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Map a failed call to a [`NormalizedError`].
///
/// | status     | kind          |
/// |------------|---------------|
/// | 401        | AuthFailed    |
/// | 404        | NotFound      |
/// | 403        | Forbidden     |
/// | >= 500     | ServerError   |
/// | 400, other | InvalidParams |
pub fn map_failure(status: u16, body: &str) -> NormalizedError {
    map_classified_failure(status, status, None, body)
}

/// Map a failure whose classification differs from what was on the wire.
///
/// `status` selects the kind; `httpStatus` in the diagnostics is always
/// `http_status`, and a business `errcode` is recorded when there is one.
pub fn map_classified_failure(
    status: u16,
    http_status: u16,
    errcode: Option<i64>,
    body: &str,
) -> NormalizedError {
    let mut diagnostics = Map::new();
    diagnostics.insert("httpStatus".to_string(), Value::from(http_status));
    if let Some(errcode) = errcode {
        diagnostics.insert("errcode".to_string(), Value::from(errcode));
    }

    let upstream = serde_json::from_str::<Value>(body).ok();
    let errmsg = upstream
        .as_ref()
        .and_then(|v| v.get("errmsg"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    match upstream {
        Some(value) => {
            diagnostics.insert("upstream".to_string(), value);
        }
        None => {
            let raw: String = body.chars().take(RAW_TEXT_LIMIT).collect();
            diagnostics.insert("rawText".to_string(), Value::String(raw));
        }
    }

    let upstream_message = |fallback: &str| errmsg.clone().unwrap_or_else(|| fallback.to_string());

    let (kind, message) = match status {
        401 => (
            FailureKind::AuthFailed,
            "authentication failed: invalid or expired credentials".to_string(),
        ),
        404 => (
            FailureKind::NotFound,
            format!("resource not found: {}", upstream_message("Resource not found")),
        ),
        403 => (
            FailureKind::Forbidden,
            "permission denied: cannot operate on this project/interface".to_string(),
        ),
        s if s >= 500 => (
            FailureKind::ServerError,
            format!("upstream server error: {}", upstream_message("Internal server error")),
        ),
        400 => (
            FailureKind::InvalidParams,
            format!("invalid params: {}", upstream_message("Bad request")),
        ),
        s => (FailureKind::InvalidParams, format!("invalid params: HTTP {}", s)),
    };

    NormalizedError {
        kind,
        message,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_table() {
        let cases = [
            (401, FailureKind::AuthFailed, -32001),
            (404, FailureKind::NotFound, -32002),
            (403, FailureKind::Forbidden, -32003),
            (500, FailureKind::ServerError, -32000),
            (503, FailureKind::ServerError, -32000),
            (400, FailureKind::InvalidParams, -32602),
            (409, FailureKind::InvalidParams, -32602),
            (422, FailureKind::InvalidParams, -32602),
        ];

        for (status, kind, code) in cases {
            let err = map_failure(status, "");
            assert_eq!(err.kind, kind, "status {}", status);
            assert_eq!(err.code(), code, "status {}", status);
            assert_eq!(err.diagnostics["httpStatus"], json!(status));
        }
    }

    #[test]
    fn test_embedded_failure_keeps_wire_status() {
        let body = r#"{"errcode": 490, "errmsg": "不存在的"}"#;
        let err = map_classified_failure(404, 200, Some(490), body);
        assert_eq!(err.kind, FailureKind::NotFound);
        assert_eq!(err.message, "resource not found: 不存在的");
        assert_eq!(err.diagnostics["httpStatus"], json!(200));
        assert_eq!(err.diagnostics["errcode"], json!(490));
    }

    #[test]
    fn test_plain_http_failure_has_no_errcode() {
        assert!(!map_failure(502, "").diagnostics.contains_key("errcode"));
    }

    #[test]
    fn test_messages_use_upstream_errmsg() {
        let body = r#"{"errcode": 490, "errmsg": "不存在的"}"#;
        assert_eq!(map_failure(404, body).message, "resource not found: 不存在的");
        assert_eq!(map_failure(500, body).message, "upstream server error: 不存在的");
        assert_eq!(map_failure(400, body).message, "invalid params: 不存在的");
    }

    #[test]
    fn test_messages_fall_back_without_errmsg() {
        assert_eq!(map_failure(404, "{}").message, "resource not found: Resource not found");
        assert_eq!(
            map_failure(502, "{}").message,
            "upstream server error: Internal server error"
        );
        assert_eq!(map_failure(400, "{}").message, "invalid params: Bad request");
        assert_eq!(map_failure(418, "{}").message, "invalid params: HTTP 418");
        assert_eq!(
            map_failure(401, r#"{"errmsg": "ignored"}"#).message,
            "authentication failed: invalid or expired credentials"
        );
    }

    #[test]
    fn test_json_body_attached_as_upstream() {
        let err = map_failure(400, r#"{"errcode": 400, "errmsg": "项目不存在"}"#);
        assert_eq!(
            err.diagnostics["upstream"],
            json!({ "errcode": 400, "errmsg": "项目不存在" })
        );
        assert!(!err.diagnostics.contains_key("rawText"));
    }

    #[test]
    fn test_raw_body_truncated_to_200_chars() {
        let body = "网".repeat(300);
        let err = map_failure(502, &body);
        let raw = err.diagnostics["rawText"].as_str().unwrap();
        assert_eq!(raw.chars().count(), 200);
        assert!(!err.diagnostics.contains_key("upstream"));
    }

    #[test]
    fn test_into_mcp_error_keeps_code_and_diagnostics() {
        let mcp = map_failure(403, "<html>denied</html>").into_mcp_error();
        assert_eq!(mcp.code.0, -32003);
        assert_eq!(
            mcp.message,
            "permission denied: cannot operate on this project/interface"
        );
        let data = mcp.data.unwrap();
        assert_eq!(data["httpStatus"], json!(403));
        assert_eq!(data["rawText"], json!("<html>denied</html>"));
    }
}

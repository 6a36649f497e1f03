//! Failure type of the YApi client.

use thiserror::Error;

/// Result type for YApi client operations.
pub type YapiResult<T> = std::result::Result<T, YapiError>;

/// Everything that can go wrong while talking to YApi.
///
/// HTTP-level failures and business errors embedded in a 200 response
/// both surface as [`YapiError::Status`], so callers only need one arm
/// to route them through the error mapper.
#[derive(Debug, Error)]
pub enum YapiError {
    /// Non-2xx response, or a 2xx response carrying a non-zero `errcode`.
    ///
    /// `status` is the status the failure is classified under; `http_status`
    /// is what was actually received. They differ only for embedded errors.
    #[error("{}", describe_status(.http_status, .errcode))]
    Status {
        status: u16,
        http_status: u16,
        errcode: Option<i64>,
        body: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Local input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The client could not be built from the configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl YapiError {
    /// Failure for a non-2xx HTTP response.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            http_status: status,
            errcode: None,
            body: body.into(),
        }
    }

    /// Failure for a business error embedded in a response received with
    /// `http_status`.
    pub fn embedded(http_status: u16, errcode: i64, body: impl Into<String>) -> Self {
        Self::Status {
            status: status_for_errcode(errcode),
            http_status,
            errcode: Some(errcode),
            body: body.into(),
        }
    }

    /// A successful exchange whose payload names nothing, classified as 404.
    pub fn missing(http_status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status: 404,
            http_status,
            errcode: None,
            body: body.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The HTTP status the failure is classified under, if it has one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_status(http_status: &u16, errcode: &Option<i64>) -> String {
    match errcode {
        Some(code) => format!("YApi reported errcode {} (HTTP {})", code, http_status),
        None => format!("HTTP {} returned by YApi", http_status),
    }
}

/// YApi errcode for "not logged in".
const ERRCODE_NOT_LOGGED_IN: i64 = 40011;
/// YApi errcode for "permission denied".
const ERRCODE_NO_PERMISSION: i64 = 405;
/// YApi errcode for "record does not exist".
const ERRCODE_NOT_EXIST: i64 = 490;

/// Pick the HTTP status an embedded errcode is treated as.
fn status_for_errcode(errcode: i64) -> u16 {
    match errcode {
        ERRCODE_NOT_LOGGED_IN => 401,
        ERRCODE_NO_PERMISSION => 403,
        ERRCODE_NOT_EXIST => 404,
        400..=599 => errcode as u16,
        _ => 400,
    }
}

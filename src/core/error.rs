//! Errors that stop the server.
//!
//! Failures of individual tool calls never get here; they are answered on
//! the MCP error channel by the tools themselves.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed settings, detected before serving.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

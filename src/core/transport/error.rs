//! Transport failures.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The listening socket could not be opened.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP initialize exchange did not complete.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// The transport stopped abnormally after startup.
    #[error("transport stopped with an error: {0}")]
    Serve(String),
}

impl TransportError {
    pub fn bind(addr: impl ToString, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.to_string(),
            source,
        }
    }
}

//! Transports the MCP server can be reached over.
//!
//! Which ones exist depends on cargo features:
//! - `stdio` (default): one session over stdin/stdout
//! - `tcp`: line-delimited JSON-RPC, one session per connection
//! - `http`: stateless JSON-RPC over `POST`
//!
//! `MCP_TRANSPORT` picks one of the compiled-in transports at startup.

mod config;
mod error;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("enable at least one transport feature: stdio, tcp or http");

use tracing::info;

use crate::core::McpServer;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};

#[cfg(any(feature = "tcp", feature = "http"))]
pub use config::ListenAddr;

#[cfg(feature = "http")]
pub use config::HttpConfig;

/// Serve `server` over the given transport until it shuts down.
pub async fn serve(config: TransportConfig, server: McpServer) -> TransportResult<()> {
    info!("Starting transport: {}", config.description());

    match config {
        #[cfg(feature = "stdio")]
        TransportConfig::Stdio => stdio::StdioTransport::run(server).await,
        #[cfg(feature = "tcp")]
        TransportConfig::Tcp(addr) => tcp::TcpTransport::new(addr).run(server).await,
        #[cfg(feature = "http")]
        TransportConfig::Http(cfg) => http::HttpTransport::new(cfg).run(server).await,
    }
}

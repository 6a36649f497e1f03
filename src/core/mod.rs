//! Process-level plumbing: configuration, the MCP server handler, its
//! transports and the error type startup failures are reported with.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, YapiConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::TransportConfig;

/// Serve MCP clients over the configured transport until it shuts down.
pub async fn run(config: Config) -> Result<()> {
    let transport = config.transport.clone();
    let server = McpServer::new(config);
    transport::serve(transport, server).await?;
    Ok(())
}

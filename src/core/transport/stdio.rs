//! STDIO transport: a single MCP session over the process's stdin/stdout.
//!
//! Nothing but protocol frames may be written to stdout while it runs.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::Handshake(e.to_string()))?;
        info!(server = %name, "MCP session established on stdio");

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::Serve(e.to_string()))?;

        info!("stdio session closed: {:?}", reason);
        Ok(())
    }
}

//! TCP transport: every accepted connection gets its own MCP session.
//!
//! Sessions share the server (and its read-only configuration) but nothing
//! else; a failing session never affects the listener or other clients.

use rmcp::ServiceExt;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, debug, info, info_span, warn};

use super::{ListenAddr, TransportError, TransportResult};
use crate::core::McpServer;

/// Pause after a failed `accept` so a persistent error does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    addr: ListenAddr,
}

impl TcpTransport {
    pub fn new(addr: ListenAddr) -> Self {
        Self { addr }
    }

    /// Accept clients until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let listener = TcpListener::bind((self.addr.host.as_str(), self.addr.port))
            .await
            .map_err(|e| TransportError::bind(&self.addr, e))?;
        info!("Listening for MCP clients on tcp://{}", self.addr);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                debug!("Could not set TCP_NODELAY for {}: {}", peer, e);
            }

            let session = serve_connection(server.clone(), stream)
                .instrument(info_span!("tcp_session", %peer));
            tokio::spawn(session);
        }
    }
}

async fn serve_connection(server: McpServer, stream: TcpStream) {
    let session = match server.serve(stream).await {
        Ok(session) => session,
        Err(e) => {
            warn!("MCP handshake failed: {}", e);
            return;
        }
    };
    info!("Client connected");

    match session.waiting().await {
        Ok(reason) => info!("Client disconnected: {:?}", reason),
        Err(e) => warn!("Session task failed: {}", e),
    }
}

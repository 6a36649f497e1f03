//! The MCP server handler.
//!
//! `McpServer` only carries the read-only configuration and the tool router;
//! each tool call builds its own YApi client, so clones of the server can
//! serve any number of sessions concurrently.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_tool_router};

const SERVER_INSTRUCTIONS: &str = "Tools for YApi interface documentation: search interfaces of a project, read a full interface definition, and create, update or save interfaces.";

#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Tool metadata as MCP `tools/list` entries.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                    "outputSchema": tool.output_schema
                })
            })
            .collect()
    }

    /// Run a tool outside an rmcp session, as the HTTP transport does.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        ToolRegistry::new(self.config.clone())
            .call_tool(name, arguments)
            .await
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

//! The list of tools and, for the HTTP transport, name-based dispatch.

use std::sync::Arc;

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::{
    CreateInterfaceTool, GetInterfaceTool, SaveInterfaceTool, SearchInterfacesTool,
    UpdateInterfaceTool,
};
use crate::core::config::Config;

pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchInterfacesTool::NAME,
            GetInterfaceTool::NAME,
            CreateInterfaceTool::NAME,
            UpdateInterfaceTool::NAME,
            SaveInterfaceTool::NAME,
        ]
    }

    /// Metadata of every tool, in registration order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchInterfacesTool::to_tool(),
            GetInterfaceTool::to_tool(),
            CreateInterfaceTool::to_tool(),
            UpdateInterfaceTool::to_tool(),
            SaveInterfaceTool::to_tool(),
        ]
    }

    /// Run the named tool with raw JSON arguments.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let config = self.config.clone();
        match name {
            SearchInterfacesTool::NAME => SearchInterfacesTool::http_handler(arguments, config).await,
            GetInterfaceTool::NAME => GetInterfaceTool::http_handler(arguments, config).await,
            CreateInterfaceTool::NAME => CreateInterfaceTool::http_handler(arguments, config).await,
            UpdateInterfaceTool::NAME => UpdateInterfaceTool::http_handler(arguments, config).await,
            SaveInterfaceTool::NAME => SaveInterfaceTool::http_handler(arguments, config).await,
            unknown => {
                warn!("Call to unknown tool '{}'", unknown);
                Err(rmcp::ErrorData::invalid_params(
                    format!("unknown tool: {}", unknown),
                    None,
                ))
            }
        }
    }
}

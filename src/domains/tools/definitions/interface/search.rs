//! Interface search tool.
//!
//! Searches one YApi project by keyword. Every category of the project is
//! scanned and all matches are returned in upstream order, without a cap.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{connect, ensure_positive, json_result, parse_arguments};
use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::yapi::InterfaceSummary;

const OPERATION: &str = "search";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the interface search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchInterfacesParams {
    /// YApi project ID.
    #[schemars(description = "YApi project ID (>= 1)")]
    pub project_id: i64,

    /// Keyword matched against interface title and path.
    #[schemars(description = "Search keyword, matched against interface title and path")]
    pub keyword: String,
}

/// Structured output of a search.
#[derive(Debug, Serialize, JsonSchema)]
pub struct SearchInterfacesResult {
    pub project_id: i64,
    pub keyword: String,
    pub total_count: usize,
    pub interfaces: Vec<InterfaceSummary>,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct SearchInterfacesTool;

impl SearchInterfacesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_interfaces";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search interfaces in a YApi project by keyword. Matches interface title and path and returns id, title, path and method of every match.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project_id = params.project_id, keyword = %params.keyword))]
    pub async fn execute(
        params: &SearchInterfacesParams,
        config: &Config,
    ) -> Result<CallToolResult, ToolError> {
        ensure_positive("project_id", params.project_id)?;
        let keyword = params.keyword.trim();
        if keyword.is_empty() {
            return Err(ToolError::validation("keyword must not be empty"));
        }

        let client = connect(OPERATION, config)?;
        let interfaces = client
            .search_interfaces(params.project_id, keyword)
            .await
            .map_err(|e| ToolError::from_yapi(OPERATION, e))?;

        info!("Found {} interface(s) matching '{}'", interfaces.len(), keyword);

        let result = SearchInterfacesResult {
            project_id: params.project_id,
            keyword: keyword.to_string(),
            total_count: interfaces.len(),
            interfaces,
        };
        json_result(OPERATION, &result.interfaces, &result)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let params: SearchInterfacesParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &config)
            .await
            .map_err(ToolError::into_mcp_error)?;
        serde_json::to_value(&result).map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SearchInterfacesParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<SearchInterfacesResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: SearchInterfacesParams =
                    parse_arguments(serde_json::Value::Object(args))?;
                Self::execute(&params, &config)
                    .await
                    .map_err(ToolError::into_mcp_error)
            }
            .boxed()
        })
    }
}

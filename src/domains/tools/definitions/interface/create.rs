//! Interface creation tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{
    connect, ensure_path, ensure_positive, ensure_title, json_result, parse_arguments,
    parse_method,
};
use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::yapi::NewInterface;

const OPERATION: &str = "create";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the interface creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateInterfaceParams {
    #[schemars(description = "YApi project ID (>= 1)")]
    pub project_id: i64,

    #[schemars(description = "Interface title (1-200 characters)")]
    pub title: String,

    #[schemars(description = "Interface path, must start with /")]
    pub path: String,

    #[schemars(description = "HTTP method: GET, POST, PUT, DELETE, PATCH, HEAD or OPTIONS")]
    pub method: String,

    /// Request body definition (JSON string).
    #[serde(default)]
    #[schemars(description = "Request body definition as a JSON string (optional)")]
    pub req_body: Option<String>,

    /// Response body definition (JSON string).
    #[serde(default)]
    #[schemars(description = "Response body definition as a JSON string (optional)")]
    pub res_body: Option<String>,

    #[serde(default)]
    #[schemars(description = "Interface description (optional)")]
    pub desc: Option<String>,
}

/// Structured output of a creation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CreateInterfaceResult {
    pub interface_id: i64,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct CreateInterfaceTool;

impl CreateInterfaceTool {
    pub const NAME: &'static str = "create_interface";

    pub const DESCRIPTION: &'static str = "Create a new interface definition in a YApi project. Returns the id of the created interface.";

    #[instrument(skip_all, fields(project_id = params.project_id, path = %params.path))]
    pub async fn execute(
        params: &CreateInterfaceParams,
        config: &Config,
    ) -> Result<CallToolResult, ToolError> {
        ensure_positive("project_id", params.project_id)?;
        ensure_title(&params.title)?;
        ensure_path(&params.path)?;
        let method = parse_method(&params.method)?;

        let payload = NewInterface {
            project_id: params.project_id,
            catid: None,
            title: params.title.clone(),
            path: params.path.clone(),
            method,
            request_body: params.req_body.clone(),
            response_body: params.res_body.clone(),
            description: params.desc.clone(),
        };

        let client = connect(OPERATION, config)?;
        let interface_id = client
            .create_interface(&payload)
            .await
            .map_err(|e| ToolError::from_yapi(OPERATION, e))?;

        info!("Created interface {} ({} {})", interface_id, method, params.path);
        let result = CreateInterfaceResult { interface_id };
        json_result(OPERATION, &result, &result)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let params: CreateInterfaceParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &config)
            .await
            .map_err(ToolError::into_mcp_error)?;
        serde_json::to_value(&result).map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CreateInterfaceParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<CreateInterfaceResult>().into()),
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
                let params: CreateInterfaceParams =
                    parse_arguments(serde_json::Value::Object(args))?;
                Self::execute(&params, &config)
                    .await
                    .map_err(ToolError::into_mcp_error)
            }
            .boxed()
        })
    }
}

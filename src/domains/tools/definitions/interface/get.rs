//! Interface detail tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{connect, ensure_positive, json_result, parse_arguments};
use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::yapi::InterfaceDetail;

const OPERATION: &str = "get";

/// Parameters for the interface detail tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInterfaceParams {
    #[schemars(description = "Interface ID (>= 1)")]
    pub interface_id: i64,
}

pub struct GetInterfaceTool;

impl GetInterfaceTool {
    pub const NAME: &'static str = "get_interface";

    pub const DESCRIPTION: &'static str = "Get the complete definition of a YApi interface, including request body, response body and description.";

    #[instrument(skip_all, fields(interface_id = params.interface_id))]
    pub async fn execute(
        params: &GetInterfaceParams,
        config: &Config,
    ) -> Result<CallToolResult, ToolError> {
        ensure_positive("interface_id", params.interface_id)?;

        let client = connect(OPERATION, config)?;
        let detail = client
            .get_interface(params.interface_id)
            .await
            .map_err(|e| ToolError::from_yapi(OPERATION, e))?;

        info!("Fetched interface {} ({} {})", detail.id, detail.method, detail.path);
        json_result(OPERATION, &detail, &detail)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let params: GetInterfaceParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &config)
            .await
            .map_err(ToolError::into_mcp_error)?;
        serde_json::to_value(&result).map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetInterfaceParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<InterfaceDetail>().into()),
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
                let params: GetInterfaceParams = parse_arguments(serde_json::Value::Object(args))?;
                Self::execute(&params, &config)
                    .await
                    .map_err(ToolError::into_mcp_error)
            }
            .boxed()
        })
    }
}

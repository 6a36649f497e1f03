//! Interface update tool.
//!
//! Partial update: only fields present in the call are sent to YApi, the
//! rest of the interface stays untouched.

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
use crate::domains::yapi::InterfacePatch;

const OPERATION: &str = "update";

/// Parameters for the interface update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateInterfaceParams {
    #[schemars(description = "ID of the interface to update (>= 1)")]
    pub interface_id: i64,

    #[serde(default)]
    #[schemars(description = "New title (1-200 characters)")]
    pub title: Option<String>,

    #[serde(default)]
    #[schemars(description = "New path, must start with /")]
    pub path: Option<String>,

    #[serde(default)]
    #[schemars(description = "New HTTP method: GET, POST, PUT, DELETE, PATCH, HEAD or OPTIONS")]
    pub method: Option<String>,

    #[serde(default)]
    #[schemars(description = "New request body definition as a JSON string")]
    pub req_body: Option<String>,

    #[serde(default)]
    #[schemars(description = "New response body definition as a JSON string")]
    pub res_body: Option<String>,

    #[serde(default)]
    #[schemars(description = "New description")]
    pub desc: Option<String>,
}

/// Structured output of an update.
#[derive(Debug, Serialize, JsonSchema)]
pub struct UpdateInterfaceResult {
    pub success: bool,
    pub message: String,
}

pub struct UpdateInterfaceTool;

impl UpdateInterfaceTool {
    pub const NAME: &'static str = "update_interface";

    pub const DESCRIPTION: &'static str = "Update an existing YApi interface. Only the fields provided are changed; omitted fields keep their current value.";

    #[instrument(skip_all, fields(interface_id = params.interface_id))]
    pub async fn execute(
        params: &UpdateInterfaceParams,
        config: &Config,
    ) -> Result<CallToolResult, ToolError> {
        let patch = Self::build_patch(params)?;

        let client = connect(OPERATION, config)?;
        let success = client
            .update_interface(&patch)
            .await
            .map_err(|e| ToolError::from_yapi(OPERATION, e))?;

        info!("Updated interface {}", params.interface_id);
        let result = UpdateInterfaceResult {
            success,
            message: "interface updated".to_string(),
        };
        json_result(OPERATION, &result, &result)
    }

    /// Validate the provided fields and turn them into a patch.
    fn build_patch(params: &UpdateInterfaceParams) -> Result<InterfacePatch, ToolError> {
        ensure_positive("interface_id", params.interface_id)?;
        if let Some(title) = &params.title {
            ensure_title(title)?;
        }
        if let Some(path) = &params.path {
            ensure_path(path)?;
        }
        let method = params.method.as_deref().map(parse_method).transpose()?;

        Ok(InterfacePatch {
            title: params.title.clone(),
            path: params.path.clone(),
            method,
            request_body: params.req_body.clone(),
            response_body: params.res_body.clone(),
            description: params.desc.clone(),
            ..InterfacePatch::new(params.interface_id)
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let params: UpdateInterfaceParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &config)
            .await
            .map_err(ToolError::into_mcp_error)?;
        serde_json::to_value(&result).map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<UpdateInterfaceParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<UpdateInterfaceResult>().into()),
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
                let params: UpdateInterfaceParams =
                    parse_arguments(serde_json::Value::Object(args))?;
                Self::execute(&params, &config)
                    .await
                    .map_err(ToolError::into_mcp_error)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::yapi::HttpMethod;

    fn params(json: serde_json::Value) -> UpdateInterfaceParams {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_patch_contains_only_provided_fields() {
        let patch = UpdateInterfaceTool::build_patch(&params(serde_json::json!({
            "interface_id": 123,
            "title": "更新的标题"
        })))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "id": 123, "title": "更新的标题" })
        );
    }

    #[test]
    fn test_patch_upper_cases_method() {
        let patch = UpdateInterfaceTool::build_patch(&params(serde_json::json!({
            "interface_id": 1,
            "method": "delete",
            "desc": ""
        })))
        .unwrap();

        assert_eq!(patch.method, Some(HttpMethod::Delete));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "id": 1, "method": "DELETE", "desc": "" })
        );
    }

    #[test]
    fn test_path_checked_only_when_provided() {
        let ok = UpdateInterfaceTool::build_patch(&params(serde_json::json!({ "interface_id": 1 })));
        assert!(ok.is_ok());

        let err = UpdateInterfaceTool::build_patch(&params(serde_json::json!({
            "interface_id": 1,
            "path": "no-slash"
        })))
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }
}

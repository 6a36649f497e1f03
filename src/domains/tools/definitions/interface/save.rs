//! Interface save tool.
//!
//! Creates an interface in the given category when no `interface_id` is
//! passed, otherwise updates that interface (and moves it to the category).

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
use crate::domains::yapi::{SaveInterface, SaveOutcome};

const OPERATION: &str = "save";

/// Parameters for the interface save tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SaveInterfaceParams {
    #[schemars(description = "Category ID the interface belongs to (>= 1)")]
    pub category_id: i64,

    #[serde(default)]
    #[schemars(description = "Interface ID; omit to create a new interface")]
    pub interface_id: Option<i64>,

    #[serde(default)]
    #[schemars(description = "Project ID, required when creating")]
    pub project_id: Option<i64>,

    #[serde(default)]
    #[schemars(description = "Title (1-200 characters), required when creating")]
    pub title: Option<String>,

    #[serde(default)]
    #[schemars(description = "Path starting with /, required when creating")]
    pub path: Option<String>,

    #[serde(default)]
    #[schemars(description = "HTTP method, required when creating")]
    pub method: Option<String>,

    #[serde(default)]
    #[schemars(description = "Request body definition as a JSON string")]
    pub req_body: Option<String>,

    #[serde(default)]
    #[schemars(description = "Response body definition as a JSON string")]
    pub res_body: Option<String>,

    #[serde(default)]
    #[schemars(description = "Description")]
    pub desc: Option<String>,
}

/// Structured output of a save.
#[derive(Debug, Serialize, JsonSchema)]
pub struct SaveInterfaceResult {
    pub interface_id: i64,
    /// "created" or "updated".
    pub action: String,
}

impl From<SaveOutcome> for SaveInterfaceResult {
    fn from(outcome: SaveOutcome) -> Self {
        let action = match outcome {
            SaveOutcome::Created(_) => "created",
            SaveOutcome::Updated(_) => "updated",
        };
        Self {
            interface_id: outcome.interface_id(),
            action: action.to_string(),
        }
    }
}

pub struct SaveInterfaceTool;

impl SaveInterfaceTool {
    pub const NAME: &'static str = "save_interface";

    pub const DESCRIPTION: &'static str = "Create or update a YApi interface in one call. Without interface_id a new interface is created (project_id, title, path and method required); with interface_id only the provided fields are updated.";

    #[instrument(skip_all, fields(category_id = params.category_id, interface_id = ?params.interface_id))]
    pub async fn execute(
        params: &SaveInterfaceParams,
        config: &Config,
    ) -> Result<CallToolResult, ToolError> {
        let input = Self::build_input(params)?;

        let client = connect(OPERATION, config)?;
        let outcome = client
            .save_interface(input)
            .await
            .map_err(|e| ToolError::from_yapi(OPERATION, e))?;

        info!("Saved interface: {:?}", outcome);
        let result = SaveInterfaceResult::from(outcome);
        json_result(OPERATION, &result, &result)
    }

    /// Validate the fields that were provided.
    ///
    /// In update mode every supplied title and path is checked, empty ones
    /// included. Completeness of create mode is checked by the client, which
    /// reports missing and blank fields all at once.
    fn build_input(params: &SaveInterfaceParams) -> Result<SaveInterface, ToolError> {
        ensure_positive("category_id", params.category_id)?;
        if let Some(id) = params.interface_id {
            ensure_positive("interface_id", id)?;
        }
        if let Some(project_id) = params.project_id {
            ensure_positive("project_id", project_id)?;
        }
        let updating = params.interface_id.is_some();
        if let Some(title) = params.title.as_deref().filter(|t| updating || !t.trim().is_empty()) {
            ensure_title(title)?;
        }
        if let Some(path) = params.path.as_deref().filter(|p| updating || !p.is_empty()) {
            ensure_path(path)?;
        }
        let method = params.method.as_deref().map(parse_method).transpose()?;

        Ok(SaveInterface {
            category_id: params.category_id,
            id: params.interface_id,
            project_id: params.project_id,
            title: params.title.clone(),
            path: params.path.clone(),
            method,
            request_body: params.req_body.clone(),
            response_body: params.res_body.clone(),
            description: params.desc.clone(),
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, rmcp::ErrorData> {
        let params: SaveInterfaceParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &config)
            .await
            .map_err(ToolError::into_mcp_error)?;
        serde_json::to_value(&result).map_err(|e| rmcp::ErrorData::internal_error(e.to_string(), None))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SaveInterfaceParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<SaveInterfaceResult>().into()),
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
                let params: SaveInterfaceParams = parse_arguments(serde_json::Value::Object(args))?;
                Self::execute(&params, &config)
                    .await
                    .map_err(ToolError::into_mcp_error)
            }
            .boxed()
        })
    }
}

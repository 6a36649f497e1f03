//! rmcp `ToolRouter` for the session-based transports (STDIO and TCP).

use std::sync::Arc;

use rmcp::handler::server::tool::{ToolRoute, ToolRouter};

use super::definitions::{
    CreateInterfaceTool, GetInterfaceTool, SaveInterfaceTool, SearchInterfacesTool,
    UpdateInterfaceTool,
};
use crate::core::config::Config;

/// Route every tool, in the same order [`super::ToolRegistry`] lists them.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let routes: [fn(Arc<Config>) -> ToolRoute<S>; 5] = [
        SearchInterfacesTool::create_route::<S>,
        GetInterfaceTool::create_route::<S>,
        CreateInterfaceTool::create_route::<S>,
        UpdateInterfaceTool::create_route::<S>,
        SaveInterfaceTool::create_route::<S>,
    ];

    routes
        .into_iter()
        .fold(ToolRouter::new(), |router, route| router.with_route(route(config.clone())))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct Harness;

    #[test]
    fn test_router_and_registry_expose_same_tools() {
        let config = Arc::new(Config::default());
        let router: ToolRouter<Harness> = build_tool_router(config.clone());

        let mut routed: Vec<String> = router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        let mut registered: Vec<String> = ToolRegistry::new(config)
            .tool_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        routed.sort();
        registered.sort();

        assert_eq!(routed, registered);
        assert_eq!(routed.len(), 5);
    }

    #[test]
    fn test_routed_schemas_are_objects() {
        let router: ToolRouter<Harness> = build_tool_router(Arc::new(Config::default()));
        for tool in router.list_all() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} input schema",
                tool.name
            );
        }
    }
}

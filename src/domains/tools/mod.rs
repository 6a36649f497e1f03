//! Tools domain module.
//!
//! Tools are the operations MCP clients can call. Each one validates its
//! input, performs one YApi call and translates any failure into an MCP error.
//!
//! A tool is one file under `definitions/` exposing `execute()` plus two
//! adapters: `create_route()` for the session transports (collected in
//! `router.rs`) and `http_handler()` for the HTTP transport (dispatched by
//! `registry.rs`). Both must list the same tools.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;

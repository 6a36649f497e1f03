//! YApi MCP Server Library
//!
//! This crate exposes a YApi server's interface documentation to MCP clients
//! as a small set of tools: search, get, create, update and save.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **yapi**: the cookie-authenticated HTTP client, data model and error mapping
//!   - **tools**: the MCP tools built on top of the client
//!
//! # Example
//!
//! ```rust,no_run
//! use yapi_mcp_server::core::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::from_env();
//!     config.validate()?;
//!     yapi_mcp_server::core::run(config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

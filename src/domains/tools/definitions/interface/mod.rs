//! YApi interface tools.
//!
//! - `search`: keyword search across all categories of a project
//! - `get`: full definition of one interface
//! - `create`: create an interface
//! - `update`: partial update of an interface
//! - `save`: create-or-update in one call
//!
//! Each tool has handlers for both HTTP and STDIO/TCP transports.

pub mod common;
pub mod create;
pub mod get;
pub mod save;
pub mod search;
pub mod update;

pub use create::{CreateInterfaceParams, CreateInterfaceTool};
pub use get::{GetInterfaceParams, GetInterfaceTool};
pub use save::{SaveInterfaceParams, SaveInterfaceTool};
pub use search::{SearchInterfacesParams, SearchInterfacesTool};
pub use update::{UpdateInterfaceParams, UpdateInterfaceTool};

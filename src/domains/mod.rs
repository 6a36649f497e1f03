//! Domains module containing business logic organized by bounded contexts.
//!
//! - **yapi**: the YApi HTTP client, its data model and error mapping
//! - **tools**: MCP tools that expose YApi operations to clients

pub mod tools;
pub mod yapi;

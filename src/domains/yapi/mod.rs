//! YApi domain module.
//!
//! - `models` - interface records and request payloads in YApi's wire format
//! - `client` - the authenticated HTTP client and response validation
//! - `error` - the client's failure type
//! - `mapper` - translation of failures into normalized MCP errors

pub mod client;
pub mod error;
pub mod mapper;
pub mod models;

pub use client::{YapiClient, check_response};
pub use error::{YapiError, YapiResult};
pub use mapper::{FailureKind, NormalizedError, map_classified_failure, map_failure};
pub use models::{
    HttpMethod, InterfaceDetail, InterfacePatch, InterfaceSummary, NewInterface, SaveInterface,
    SaveOutcome,
};

//! Typed representations of YApi records and payloads.
//!
//! Field names follow the YApi wire format (`_id`, `project_id`, `desc`,
//! `req_body_other`, `res_body`) in both directions, so a record parsed from
//! the API serializes back to the same shape for tool output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Short projection of an interface, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterfaceSummary {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub path: String,
    pub method: String,
}

/// Full interface definition, as returned by `interface/get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterfaceDetail {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub path: String,
    pub method: String,
    pub project_id: i64,

    /// Category the interface belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catid: Option<i64>,

    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Request body schema, kept as the raw JSON string YApi stores.
    #[serde(rename = "req_body_other", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,

    /// Response body schema, kept as the raw JSON string YApi stores.
    #[serde(rename = "res_body", default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

/// One node of the `interface/list_menu` category tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub list: Vec<InterfaceSummary>,
}

/// Payload part of YApi's uniform response wrapper.
///
/// `errcode` and `errmsg` are checked before this is decoded.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// `data` of a successful `interface/add` call.
#[derive(Debug, Deserialize)]
pub struct CreatedInterface {
    #[serde(rename = "_id")]
    pub id: i64,
}

/// HTTP methods YApi accepts for an interface definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| {
                let allowed: Vec<_> = Self::ALL.iter().map(HttpMethod::as_str).collect();
                format!("unsupported HTTP method '{}', expected one of {}", s, allowed.join(", "))
            })
    }
}

/// Payload of `interface/add`.
///
/// Empty optional strings are dropped so YApi keeps its own defaults.
#[derive(Debug, Clone, Serialize)]
pub struct NewInterface {
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catid: Option<i64>,
    pub title: String,
    pub path: String,
    pub method: HttpMethod,
    #[serde(rename = "req_body_other", skip_serializing_if = "is_blank")]
    pub request_body: Option<String>,
    #[serde(rename = "res_body", skip_serializing_if = "is_blank")]
    pub response_body: Option<String>,
    #[serde(rename = "desc", skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

/// Payload of `interface/up`.
///
/// Only `Some` fields are sent; an explicit empty string is sent verbatim.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InterfacePatch {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(rename = "req_body_other", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(rename = "res_body", skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InterfacePatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// Input of the unified save operation.
///
/// Without `id` it creates a new interface, with `id` it patches that one.
#[derive(Debug, Clone, Default)]
pub struct SaveInterface {
    pub category_id: i64,
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub title: Option<String>,
    pub path: Option<String>,
    pub method: Option<HttpMethod>,
    pub request_body: Option<String>,
    pub response_body: Option<String>,
    pub description: Option<String>,
}

/// What a save call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "interface_id", rename_all = "lowercase")]
pub enum SaveOutcome {
    Created(i64),
    Updated(i64),
}

impl SaveOutcome {
    pub fn interface_id(&self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

//! Cookie-authenticated HTTP client for the YApi API.
//!
//! This is the only place that knows YApi's endpoint shapes. Every call goes
//! through [`check_response`], which treats both non-2xx statuses and 200
//! responses carrying a non-zero `errcode` as failures.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{YapiError, YapiResult};
use super::models::{
    ApiEnvelope, Category, CreatedInterface, InterfaceDetail, InterfacePatch, InterfaceSummary,
    NewInterface, SaveInterface, SaveOutcome,
};
use crate::core::config::YapiConfig;

const MAX_REDIRECTS: usize = 10;

/// Client scoped to one set of credentials and one base URL.
///
/// Tools build one per call; dropping it releases its connections.
#[derive(Debug)]
pub struct YapiClient {
    http: reqwest::Client,
    api_base: String,
}

impl YapiClient {
    /// Build a client from validated configuration.
    pub fn new(config: &YapiConfig) -> YapiResult<Self> {
        let mut cookie = HeaderValue::from_str(&config.cookie_header())
            .map_err(|_| YapiError::Config("cookie values contain invalid header characters".into()))?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| YapiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: format!("{}/api", config.base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint)
    }

    /// Perform one exchange and return the status with the checked JSON body.
    async fn send(&self, request: reqwest::RequestBuilder) -> YapiResult<(u16, Value)> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("YApi responded with HTTP {} ({} bytes)", status, body.len());
        check_response(status, &body).map(|value| (status, value))
    }

    /// Search interfaces of a project by keyword.
    ///
    /// Reads the category tree and flattens it in upstream order, keeping the
    /// interfaces whose title or path contains the keyword (case-insensitive).
    #[instrument(skip(self))]
    pub async fn search_interfaces(
        &self,
        project_id: i64,
        keyword: &str,
    ) -> YapiResult<Vec<InterfaceSummary>> {
        let request = self
            .http
            .get(self.url("interface/list_menu"))
            .query(&[("project_id", project_id)]);
        let (_, body) = self.send(request).await?;

        let categories: Option<Vec<Category>> = extract_data(body)?;
        let results = flatten_matching(categories.unwrap_or_default(), keyword);
        debug!("{} interface(s) matched", results.len());
        Ok(results)
    }

    /// Fetch one interface definition.
    #[instrument(skip(self))]
    pub async fn get_interface(&self, interface_id: i64) -> YapiResult<InterfaceDetail> {
        let request = self
            .http
            .get(self.url("interface/get"))
            .query(&[("id", interface_id)]);
        let (status, body) = self.send(request).await?;

        let detail: Option<InterfaceDetail> = extract_data(body)?;
        detail.ok_or_else(|| {
            YapiError::missing(
                status,
                format!(r#"{{"errmsg":"interface {} not found"}}"#, interface_id),
            )
        })
    }

    /// Create an interface and return its new id.
    #[instrument(skip(self, payload), fields(project_id = payload.project_id, path = %payload.path))]
    pub async fn create_interface(&self, payload: &NewInterface) -> YapiResult<i64> {
        let request = self.http.post(self.url("interface/add")).json(payload);
        let (_, body) = self.send(request).await?;

        let created: CreatedInterface = extract_data(body)?;
        Ok(created.id)
    }

    /// Apply a partial update; fields left as `None` stay untouched remotely.
    #[instrument(skip(self, patch), fields(interface_id = patch.id))]
    pub async fn update_interface(&self, patch: &InterfacePatch) -> YapiResult<bool> {
        let request = self.http.post(self.url("interface/up")).json(patch);
        self.send(request).await?;
        Ok(true)
    }

    /// Create when no id is given, update otherwise.
    #[instrument(skip(self, input), fields(category_id = input.category_id, id = ?input.id))]
    pub async fn save_interface(&self, input: SaveInterface) -> YapiResult<SaveOutcome> {
        match input.id {
            Some(id) => {
                let patch = InterfacePatch {
                    id,
                    catid: Some(input.category_id),
                    title: input.title,
                    path: input.path,
                    method: input.method,
                    request_body: input.request_body,
                    response_body: input.response_body,
                    description: input.description,
                };
                self.update_interface(&patch).await?;
                Ok(SaveOutcome::Updated(id))
            }
            None => {
                let payload = new_interface_from_save(input)?;
                let id = self.create_interface(&payload).await?;
                Ok(SaveOutcome::Created(id))
            }
        }
    }
}

/// Validate a YApi response.
///
/// A 2xx status is necessary but not sufficient: a JSON object with a
/// non-zero `errcode` is reported as a failure as well.
pub fn check_response(status: u16, body: &str) -> YapiResult<Value> {
    if !(200..300).contains(&status) {
        warn!("YApi returned HTTP {}", status);
        return Err(YapiError::http_status(status, body));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| YapiError::decode(format!("response is not valid JSON: {}", e)))?;

    let errcode = value.get("errcode").and_then(|code| {
        code.as_i64()
            .or_else(|| code.as_f64().map(|f| f as i64))
            .or_else(|| code.as_str().and_then(|s| s.trim().parse().ok()))
    });
    if let Some(errcode) = errcode.filter(|code| *code != 0) {
        let errmsg = value
            .get("errmsg")
            .and_then(Value::as_str)
            .unwrap_or_default();
        warn!("YApi reported errcode {}: {}", errcode, errmsg);
        return Err(YapiError::embedded(status, errcode, body));
    }

    Ok(value)
}

fn extract_data<T: DeserializeOwned>(body: Value) -> YapiResult<T> {
    serde_json::from_value::<ApiEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| YapiError::decode(format!("unexpected data shape: {}", e)))
}

fn flatten_matching(categories: Vec<Category>, keyword: &str) -> Vec<InterfaceSummary> {
    let needle = keyword.trim().to_lowercase();
    categories
        .into_iter()
        .flat_map(|category| category.list)
        .filter(|iface| {
            needle.is_empty()
                || iface.title.to_lowercase().contains(&needle)
                || iface.path.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Turn a create-mode save into a create payload, listing every missing
/// prerequisite in a single error.
fn new_interface_from_save(input: SaveInterface) -> YapiResult<NewInterface> {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.trim().is_empty());

    let mut missing = Vec::new();
    if input.project_id.is_none() {
        missing.push("project_id");
    }
    if !present(&input.title) {
        missing.push("title");
    }
    if !present(&input.path) {
        missing.push("path");
    }
    if input.method.is_none() {
        missing.push("method");
    }

    match (input.project_id, input.title, input.path, input.method) {
        (Some(project_id), Some(title), Some(path), Some(method)) if missing.is_empty() => {
            Ok(NewInterface {
                project_id,
                catid: Some(input.category_id),
                title,
                path,
                method,
                request_body: input.request_body,
                response_body: input.response_body,
                description: input.description,
            })
        }
        _ => Err(YapiError::validation(format!(
            "missing required fields for create: {}",
            missing.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::yapi::models::HttpMethod;

    fn summary(id: i64, title: &str, path: &str) -> InterfaceSummary {
        InterfaceSummary {
            id,
            title: title.to_string(),
            path: path.to_string(),
            method: "GET".to_string(),
        }
    }

    #[test]
    fn test_check_response_accepts_zero_errcode() {
        let value = check_response(200, r#"{"errcode": 0, "data": {"_id": 1}}"#).unwrap();
        assert_eq!(value["data"]["_id"], 1);
    }

    #[test]
    fn test_check_response_rejects_embedded_errcode() {
        let body = r#"{"errcode": 400, "errmsg": "项目不存在"}"#;
        match check_response(200, body).unwrap_err() {
            YapiError::Status {
                status,
                http_status,
                errcode,
                body: kept,
            } => {
                assert_eq!(status, 400);
                assert_eq!(http_status, 200);
                assert_eq!(errcode, Some(400));
                assert_eq!(kept, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_response_rejects_errcode_with_null_errmsg() {
        let err = check_response(200, r#"{"errcode": 40011, "errmsg": null, "data": null}"#)
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_check_response_rejects_errcode_with_odd_errmsg() {
        let missing = check_response(200, r#"{"errcode": 490}"#).unwrap_err();
        assert_eq!(missing.status(), Some(404));

        let numeric = check_response(200, r#"{"errcode": 405, "errmsg": 12}"#).unwrap_err();
        assert_eq!(numeric.status(), Some(403));
    }

    #[test]
    fn test_check_response_reads_string_errcode() {
        let err = check_response(200, r#"{"errcode": "40011", "errmsg": "请登录"}"#).unwrap_err();
        assert_eq!(err.status(), Some(401));

        let ok = check_response(200, r#"{"errcode": "0", "data": []}"#);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_check_response_rejects_http_status() {
        let err = check_response(502, "Bad Gateway").unwrap_err();
        match err {
            YapiError::Status { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_response_rejects_non_json_success() {
        let err = check_response(200, "<html></html>").unwrap_err();
        assert!(matches!(err, YapiError::Decode(_)));
    }

    #[test]
    fn test_flatten_preserves_category_then_record_order() {
        let categories = vec![
            Category {
                id: 1,
                name: "公共分类".to_string(),
                list: vec![summary(3, "用户登录", "/api/login"), summary(1, "订单", "/api/order")],
            },
            Category {
                id: 2,
                name: "用户".to_string(),
                list: vec![summary(2, "用户注册", "/api/register")],
            },
        ];

        let ids: Vec<_> = flatten_matching(categories, "用户").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_flatten_matches_path_case_insensitive() {
        let categories = vec![Category {
            id: 1,
            name: String::new(),
            list: vec![summary(1, "Login", "/api/Login"), summary(2, "Other", "/api/other")],
        }];
        let result = flatten_matching(categories, "LOGIN");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_save_create_mode_lists_all_missing_fields() {
        let input = SaveInterface {
            category_id: 5,
            project_id: Some(1),
            method: Some(HttpMethod::Get),
            title: Some("  ".to_string()),
            ..Default::default()
        };

        let err = new_interface_from_save(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields for create: title, path"
        );
    }

    #[test]
    fn test_save_create_mode_builds_payload() {
        let input = SaveInterface {
            category_id: 5,
            project_id: Some(1),
            title: Some("测试接口".to_string()),
            path: Some("/api/test".to_string()),
            method: Some(HttpMethod::Post),
            ..Default::default()
        };

        let payload = new_interface_from_save(input).unwrap();
        assert_eq!(payload.catid, Some(5));
        assert_eq!(payload.method, HttpMethod::Post);
    }
}

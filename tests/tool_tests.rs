//! End-to-end tool tests: arguments in, CallToolResult or MCP error out,
//! with a mocked YApi server behind the client.

use httpmock::prelude::*;
use serde_json::json;

use yapi_mcp_server::core::{Config, YapiConfig};
use yapi_mcp_server::domains::tools::ToolError;
use yapi_mcp_server::domains::tools::definitions::{
    CreateInterfaceParams, CreateInterfaceTool, GetInterfaceParams, GetInterfaceTool,
    SaveInterfaceParams, SaveInterfaceTool, SearchInterfacesParams, SearchInterfacesTool,
    UpdateInterfaceParams, UpdateInterfaceTool,
};

fn config_for(server: &MockServer) -> Config {
    Config {
        yapi: YapiConfig {
            base_url: server.base_url(),
            token: "token".to_string(),
            uid: "uid".to_string(),
            cas: None,
            ..Default::default()
        },
        ..Config::default()
    }
}

fn args<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_search_returns_structured_matches() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/interface/list_menu")
                .query_param("project_id", "1")
                .header("cookie", "_yapi_token=token; _yapi_uid=uid");
            then.status(200).json_body(json!({
                "errcode": 0,
                "data": [{
                    "_id": 10,
                    "name": "公共分类",
                    "list": [
                        { "_id": 123, "title": "用户登录", "path": "/api/login", "method": "POST" },
                        { "_id": 456, "title": "用户注册", "path": "/api/register", "method": "POST" }
                    ]
                }]
            }));
        })
        .await;

    let params: SearchInterfacesParams = args(json!({ "project_id": 1, "keyword": "用户" }));
    let result = SearchInterfacesTool::execute(&params, &config_for(&server))
        .await
        .unwrap();

    mock.assert_async().await;
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["total_count"], 2);
    assert_eq!(structured["interfaces"][0]["_id"], 123);
    assert_eq!(structured["interfaces"][0]["title"], "用户登录");
    assert_eq!(structured["interfaces"][1]["_id"], 456);
}

#[tokio::test]
async fn test_get_returns_full_definition() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/interface/get").query_param("id", "123");
            then.status(200).json_body(json!({
                "errcode": 0,
                "data": {
                    "_id": 123,
                    "title": "用户登录",
                    "path": "/api/login",
                    "method": "POST",
                    "project_id": 1,
                    "desc": "用户登录接口",
                    "req_body_other": "{\"username\": \"string\"}",
                    "res_body": "{\"token\": \"string\"}"
                }
            }));
        })
        .await;

    let params = GetInterfaceParams { interface_id: 123 };
    let result = GetInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap();

    let structured = result.structured_content.unwrap();
    assert_eq!(structured["_id"], 123);
    assert_eq!(structured["desc"], "用户登录接口");
    assert_eq!(structured["res_body"], "{\"token\": \"string\"}");
}

#[tokio::test]
async fn test_get_not_found_maps_to_not_found_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/interface/get");
            then.status(404).body("Not Found");
        })
        .await;

    let params = GetInterfaceParams { interface_id: 99 };
    let err = GetInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err()
        .into_mcp_error();

    assert_eq!(err.code.0, -32002);
    assert_eq!(err.message, "resource not found: Resource not found");
    let data = err.data.unwrap();
    assert_eq!(data["httpStatus"], 404);
    assert_eq!(data["rawText"], "Not Found");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/interface/list_menu");
            then.status(401).json_body(json!({ "errcode": 40011, "errmsg": "请登录..." }));
        })
        .await;

    let params: SearchInterfacesParams = args(json!({ "project_id": 1, "keyword": "x" }));
    let err = SearchInterfacesTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err()
        .into_mcp_error();

    assert_eq!(err.code.0, -32001);
    assert_eq!(err.message, "authentication failed: invalid or expired credentials");
    assert_eq!(err.data.unwrap()["upstream"]["errcode"], 40011);
}

#[tokio::test]
async fn test_server_error_maps_to_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/interface/up");
            then.status(500).json_body(json!({ "errcode": 500, "errmsg": "数据库连接失败" }));
        })
        .await;

    let params: UpdateInterfaceParams = args(json!({ "interface_id": 1, "title": "新标题" }));
    let err = UpdateInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Remote(_)));
    let err = err.into_mcp_error();
    assert_eq!(err.code.0, -32000);
    assert_eq!(err.message, "upstream server error: 数据库连接失败");
}

#[tokio::test]
async fn test_embedded_errcode_on_success_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/interface/list_menu");
            then.status(200)
                .json_body(json!({ "errcode": 400, "errmsg": "项目不存在" }));
        })
        .await;

    let params: SearchInterfacesParams = args(json!({ "project_id": 99999, "keyword": "test" }));
    let err = SearchInterfacesTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err()
        .into_mcp_error();

    assert_eq!(err.code.0, -32602);
    assert!(err.message.contains("项目不存在"));

    let data = err.data.unwrap();
    assert_eq!(data["httpStatus"], 200);
    assert_eq!(data["errcode"], 400);
    assert_eq!(data["upstream"]["errmsg"], "项目不存在");
}

#[tokio::test]
async fn test_embedded_errcode_without_errmsg_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/interface/get");
            then.status(200)
                .json_body(json!({ "errcode": 40011, "errmsg": null, "data": null }));
        })
        .await;

    let params: GetInterfaceParams = args(json!({ "interface_id": 123 }));
    let err = GetInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err()
        .into_mcp_error();

    assert_eq!(err.code.0, -32001);
    assert_eq!(err.data.unwrap()["httpStatus"], 200);
}

#[tokio::test]
async fn test_create_normalizes_method_and_returns_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/interface/add").json_body(json!({
                "project_id": 1,
                "title": "测试接口",
                "path": "/api/test",
                "method": "GET"
            }));
            then.status(200).json_body(json!({ "errcode": 0, "data": { "_id": 789 } }));
        })
        .await;

    let params: CreateInterfaceParams = args(json!({
        "project_id": 1,
        "title": "测试接口",
        "path": "/api/test",
        "method": "get",
        "req_body": ""
    }));
    let result = CreateInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.structured_content.unwrap()["interface_id"], 789);
}

#[tokio::test]
async fn test_create_invalid_path_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/interface/add");
            then.status(200).json_body(json!({ "errcode": 0, "data": { "_id": 1 } }));
        })
        .await;

    let params: CreateInterfaceParams = args(json!({
        "project_id": 1,
        "title": "测试接口",
        "path": "api/test",
        "method": "GET"
    }));
    let err = CreateInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Validation(_)));
    assert!(err.to_string().contains("must start with /"));
    assert_eq!(err.into_mcp_error().code.0, -32602);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_update_sends_partial_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/interface/up")
                .json_body(json!({ "id": 123, "title": "更新的标题" }));
            then.status(200).json_body(json!({ "errcode": 0, "data": {} }));
        })
        .await;

    let params: UpdateInterfaceParams = args(json!({ "interface_id": 123, "title": "更新的标题" }));
    let result = UpdateInterfaceTool::execute(&params, &config_for(&server))
        .await
        .unwrap();

    mock.assert_async().await;
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["success"], true);
}

#[tokio::test]
async fn test_save_reports_action() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/interface/add");
            then.status(200).json_body(json!({ "errcode": 0, "data": { "_id": 900 } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/interface/up");
            then.status(200).json_body(json!({ "errcode": 0, "data": {} }));
        })
        .await;
    let config = config_for(&server);

    let created: SaveInterfaceParams = args(json!({
        "category_id": 3,
        "project_id": 1,
        "title": "测试接口",
        "path": "/api/test",
        "method": "POST"
    }));
    let result = SaveInterfaceTool::execute(&created, &config).await.unwrap();
    assert_eq!(
        result.structured_content.unwrap(),
        json!({ "interface_id": 900, "action": "created" })
    );

    let updated: SaveInterfaceParams = args(json!({
        "category_id": 3,
        "interface_id": 900,
        "desc": "说明"
    }));
    let result = SaveInterfaceTool::execute(&updated, &config).await.unwrap();
    assert_eq!(
        result.structured_content.unwrap(),
        json!({ "interface_id": 900, "action": "updated" })
    );
}

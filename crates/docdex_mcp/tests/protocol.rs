//! JSON-RPC / MCP protocol behavior tests.

use docdex_config::{Config, SearchConfig};
use docdex_core::DocsService;
use docdex_mcp::{JsonRpcRequest, McpServer};
use serde_json::{json, Value};

fn server_for(mock: &mockito::Server) -> McpServer {
    let mut config = Config::default();
    config.search = SearchConfig {
        endpoint: format!("{}/search", mock.url()),
        result_limit: 2,
        timeout_secs: 5,
    };
    let service = DocsService::new(&config, Some("test-key".to_string())).unwrap();
    McpServer::new(service)
}

fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(1)),
        method: method.to_string(),
        params,
    }
}

#[tokio::test]
async fn ping_returns_empty_object() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server.handle_request(request("ping", None)).await.unwrap();
    assert!(resp.error.is_none());
    assert_eq!(resp.result.unwrap(), json!({}));
}

#[tokio::test]
async fn initialize_reports_tools_capability() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request("initialize", Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-host", "version": "0.0.0"}
        }))))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "docdex");
    assert!(result["capabilities"].get("tools").is_some());
}

#[tokio::test]
async fn tools_list_exposes_get_docs() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request("tools/list", None))
        .await
        .unwrap();

    let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_docs");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn notifications_get_no_response() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request("notifications/initialized", None))
        .await;
    assert!(resp.is_none());
}

#[tokio::test]
async fn requests_without_id_get_no_response() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: None,
        method: "ping".to_string(),
        params: None,
    };
    assert!(server.handle_request(req).await.is_none());
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request("resources/list", None))
        .await
        .unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("resources/list"));
}

#[tokio::test]
async fn unknown_tool_is_invalid_params() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request(
            "tools/call",
            Some(json!({"name": "summon_docs", "arguments": {}})),
        ))
        .await
        .unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("summon_docs"));
}

#[tokio::test]
async fn get_docs_with_unsupported_library_is_an_error() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request(
            "tools/call",
            Some(json!({
                "name": "get_docs",
                "arguments": {"query": "embeddings", "library": "cohere"}
            })),
        ))
        .await
        .unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, -32602);
    assert_eq!(error.message, "Library cohere not supported by this tool");
}

#[tokio::test]
async fn get_docs_with_missing_arguments_is_invalid() {
    let mock = mockito::Server::new_async().await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request(
            "tools/call",
            Some(json!({"name": "get_docs", "arguments": {"query": "no library"}})),
        ))
        .await
        .unwrap();

    assert_eq!(resp.error.unwrap().code, -32602);
}

#[tokio::test]
async fn get_docs_returns_text_content() {
    let mut mock = mockito::Server::new_async().await;
    mock.mock("POST", "/search")
        .with_status(200)
        .with_body(r#"{"organic":[]}"#)
        .create_async()
        .await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request(
            "tools/call",
            Some(json!({
                "name": "get_docs",
                "arguments": {"query": "function calling", "library": "openai"}
            })),
        ))
        .await
        .unwrap();

    assert!(resp.error.is_none());
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "No results found");
}

#[tokio::test]
async fn get_docs_aggregates_fetched_pages() {
    let mut mock = mockito::Server::new_async().await;
    mock.mock("POST", "/search")
        .with_status(200)
        .with_body(format!(
            r#"{{"organic":[{{"link":"{base}/a"}},{{"link":"{base}/b"}}]}}"#,
            base = mock.url()
        ))
        .create_async()
        .await;
    mock.mock("GET", "/a")
        .with_status(200)
        .with_body("<html><body><p>Alpha.</p></body></html>")
        .create_async()
        .await;
    mock.mock("GET", "/b")
        .with_status(200)
        .with_body("<html><body><p>Beta.</p></body></html>")
        .create_async()
        .await;
    let server = server_for(&mock);

    let resp = server
        .handle_request(request(
            "tools/call",
            Some(json!({
                "name": "get_docs",
                "arguments": {"query": "Chroma DB", "library": "langchain"}
            })),
        ))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    assert_eq!(result["content"][0]["text"], "Alpha.Beta.");
}

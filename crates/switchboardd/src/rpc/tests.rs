//! Unit tests for JSON-RPC method handling.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use switchboard_routing::{Catalog, Dispatcher, RoutingHistory, ToolSurface};

use super::*;

#[fixture]
fn handler() -> RpcHandler {
    let catalog = Catalog::builtin().expect("built-in catalog");
    RpcHandler::new(ToolSurface::new(Dispatcher::new(
        Arc::new(catalog),
        RoutingHistory::with_capacity(Some(8)),
    )))
}

fn request(id: i64, method: &str, params: &Value) -> Vec<u8> {
    serde_json::to_vec(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
        .expect("serialises")
}

fn answer(handler: &RpcHandler, line: &[u8]) -> RpcResponse {
    handler.handle_line(line).expect("a response")
}

#[rstest]
fn initialize_announces_protocol_and_tools(handler: RpcHandler) {
    let response = answer(
        &handler,
        &request(1, "initialize", &json!({"protocolVersion": PROTOCOL_VERSION})),
    );
    let result = response.result().expect("success");
    assert_eq!(result.get("protocolVersion"), Some(&json!(PROTOCOL_VERSION)));
    assert_eq!(result.pointer("/serverInfo/name"), Some(&json!(SERVER_NAME)));
    assert!(result.pointer("/capabilities/tools").is_some());
}

#[rstest]
fn ping_returns_empty_object(handler: RpcHandler) {
    let response = answer(&handler, &request(2, "ping", &Value::Null));
    assert_eq!(response.result(), Some(&json!({})));
    assert_eq!(response.id(), &json!(2));
}

#[rstest]
fn tools_list_includes_commands_and_management_tools(handler: RpcHandler) {
    let response = answer(&handler, &request(3, "tools/list", &json!({})));
    let tools = response
        .result()
        .and_then(|result| result.get("tools"))
        .and_then(Value::as_array)
        .expect("tool array");
    let expected = handler.surface().dispatcher().catalog().commands().len() + 4;
    assert_eq!(tools.len(), expected);
    assert!(tools.iter().all(|tool| tool.get("inputSchema").is_some()));
}

#[rstest]
fn tools_call_returns_routing_text(handler: RpcHandler) {
    let response = answer(
        &handler,
        &request(
            4,
            "tools/call",
            &json!({"name": "sc:analyze", "arguments": {"input": "check for security vulnerabilities"}}),
        ),
    );
    let result = response.result().expect("success");
    assert_eq!(result.get("isError"), Some(&json!(false)));
    let text = result
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .expect("text content");
    assert!(text.contains("security-engineer"));
}

#[rstest]
fn unknown_tool_is_an_error_result_not_a_protocol_error(handler: RpcHandler) {
    let response = answer(
        &handler,
        &request(5, "tools/call", &json!({"name": "sc:nope"})),
    );
    let result = response.result().expect("protocol success");
    assert_eq!(result.get("isError"), Some(&json!(true)));
}

#[rstest]
#[case::missing_params(Value::Null)]
#[case::missing_name(json!({"arguments": {}}))]
#[case::numeric_name(json!({"name": 3}))]
fn malformed_call_params_are_rejected(handler: RpcHandler, #[case] params: Value) {
    let response = answer(&handler, &request(6, "tools/call", &params));
    assert_eq!(response.error_code(), Some(INVALID_PARAMS));
}

#[rstest]
fn unknown_method_is_rejected(handler: RpcHandler) {
    let response = answer(&handler, &request(7, "resources/list", &Value::Null));
    assert_eq!(response.error_code(), Some(METHOD_NOT_FOUND));
    assert_eq!(response.id(), &json!(7));
}

#[rstest]
#[case(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.as_slice())]
#[case(br#"{"jsonrpc":"2.0","method":"resources/list"}"#.as_slice())]
fn notifications_are_never_answered(handler: RpcHandler, #[case] line: &[u8]) {
    assert!(handler.handle_line(line).is_none());
}

#[rstest]
fn notification_calls_still_record_history(handler: RpcHandler) {
    let line = br#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"sc:build","arguments":{"input":"api"}}}"#;
    assert!(handler.handle_line(line).is_none());
    assert_eq!(handler.surface().dispatcher().history().total_recorded(), 1);
}

#[rstest]
fn parse_errors_answer_with_null_id(handler: RpcHandler) {
    let response = answer(&handler, b"{oops");
    assert_eq!(response.error_code(), Some(PARSE_ERROR));
    assert_eq!(response.id(), &Value::Null);
}

//! Behavioural tests for a scripted stdio JSON-RPC session.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use super::support::SessionWorld;

#[fixture]
fn world() -> RefCell<SessionWorld> {
    RefCell::new(SessionWorld::new())
}

fn response_text(response: &Value) -> &str {
    response
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("no text content in {response}"))
}

#[given("a bootstrapped server")]
fn given_server(world: &RefCell<SessionWorld>) {
    assert!(!world.borrow().server().tools().list().is_empty());
}

#[given("the client sends the initialize handshake")]
fn given_handshake(world: &RefCell<SessionWorld>) {
    let mut state = world.borrow_mut();
    state.request("initialize", &json!({"protocolVersion": "2024-11-05"}));
    state.notify("notifications/initialized");
}

#[given("the client calls \"{tool}\" with input \"{input}\"")]
fn given_tool_call(world: &RefCell<SessionWorld>, tool: String, input: String) {
    world.borrow_mut().request(
        "tools/call",
        &json!({"name": tool, "arguments": {"input": input}}),
    );
}

#[given("the client requests method \"{method}\"")]
fn given_method(world: &RefCell<SessionWorld>, method: String) {
    world.borrow_mut().request(&method, &Value::Null);
}

#[given("the client sends a malformed line")]
fn given_malformed_line(world: &RefCell<SessionWorld>) {
    world.borrow_mut().queue_raw(b"{\"jsonrpc\": \"2.0\", ");
}

#[when("the session runs")]
fn when_session_runs(world: &RefCell<SessionWorld>) {
    world.borrow_mut().run();
}

#[then("{count} responses are written")]
fn then_response_count(world: &RefCell<SessionWorld>, count: usize) {
    assert_eq!(world.borrow().responses().len(), count);
}

#[then("the response to request {id} mentions \"{text}\"")]
fn then_response_mentions(world: &RefCell<SessionWorld>, id: i64, text: String) {
    let state = world.borrow();
    let response = state.response_to(id);
    assert_eq!(response.pointer("/result/isError"), Some(&json!(false)));
    assert!(response_text(response).contains(&text));
}

#[then("the response to request {id} is a tool error mentioning \"{text}\"")]
fn then_tool_error(world: &RefCell<SessionWorld>, id: i64, text: String) {
    let state = world.borrow();
    let response = state.response_to(id);
    assert_eq!(response.pointer("/result/isError"), Some(&json!(true)));
    assert!(response_text(response).contains(&text));
    assert_eq!(
        state.server().tools().dispatcher().history().total_recorded(),
        0
    );
}

#[then("the response to request {id} has error code {code}")]
fn then_error_code(world: &RefCell<SessionWorld>, id: i64, code: i64) {
    assert_eq!(
        world.borrow().response_to(id).pointer("/error/code"),
        Some(&json!(code))
    );
}

#[then("the first response has error code {code}")]
fn then_first_error_code(world: &RefCell<SessionWorld>, code: i64) {
    let state = world.borrow();
    let first = state.responses().first().expect("a response");
    assert_eq!(first.get("id"), Some(&Value::Null));
    assert_eq!(first.pointer("/error/code"), Some(&json!(code)));
}

#[then("the response to request {id} succeeds")]
fn then_succeeds(world: &RefCell<SessionWorld>, id: i64) {
    assert!(world.borrow().response_to(id).get("result").is_some());
}

#[scenario(
    path = "tests/features/server_session.feature",
    name = "Handshake then routed tool call"
)]
fn handshake_then_routed_tool_call(world: RefCell<SessionWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/server_session.feature",
    name = "Unknown tools come back as tool errors"
)]
fn unknown_tools_come_back_as_tool_errors(world: RefCell<SessionWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/server_session.feature",
    name = "Unknown methods are protocol errors"
)]
fn unknown_methods_are_protocol_errors(world: RefCell<SessionWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/server_session.feature",
    name = "Malformed lines do not stop the session"
)]
fn malformed_lines_do_not_stop_the_session(world: RefCell<SessionWorld>) {
    let _ = world;
}

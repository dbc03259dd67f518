//! Decoding of tool-call arguments.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::dispatch::DispatchRequest;
use crate::errors::RoutingError;

/// Default number of entries returned by the history tool.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Arguments accepted by every catalog command tool.
///
/// Unknown keys are ignored so callers may send extra routing hints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommandArguments {
    #[serde(alias = "args")]
    input: Option<String>,
    flags: Vec<String>,
    #[serde(
        rename = "handlerOverride",
        alias = "handler_override",
        alias = "persona"
    )]
    handler_override: Option<String>,
}

impl From<CommandArguments> for DispatchRequest {
    fn from(arguments: CommandArguments) -> Self {
        Self {
            input: arguments.input,
            flags: arguments.flags,
            handler_override: arguments
                .handler_override
                .filter(|handler| !handler.trim().is_empty()),
        }
    }
}

/// Actions of the persona tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum PersonaAction {
    List,
    Show,
    /// Same answer as `show`.
    Query,
    /// Answers like `show`; nothing is switched.
    Switch,
    Auto,
}

#[derive(Debug, Deserialize)]
pub(super) struct PersonaArguments {
    pub(super) action: PersonaAction,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) context: Option<String>,
}

/// Actions of the integration tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum McpAction {
    Status,
    Route,
}

#[derive(Debug, Deserialize)]
pub(super) struct McpArguments {
    pub(super) action: McpAction,
    #[serde(default)]
    pub(super) command: Option<String>,
    #[serde(default, alias = "personas")]
    pub(super) handlers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OptimizeArguments {
    pub(super) mode: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryArguments {
    #[serde(default = "default_history_limit")]
    pub(super) limit: usize,
}

const fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Decodes catalog command arguments into a dispatch request.
///
/// # Errors
///
/// Returns [`RoutingError::InvalidArguments`] when `arguments` is neither
/// null nor a matching object.
pub fn dispatch_request(tool: &str, arguments: &Value) -> Result<DispatchRequest, RoutingError> {
    decode::<CommandArguments>(tool, arguments).map(DispatchRequest::from)
}

pub(super) fn decode<T: DeserializeOwned>(
    tool: &str,
    arguments: &Value,
) -> Result<T, RoutingError> {
    let object = match arguments {
        Value::Null => Value::Object(Map::new()),
        Value::Object(_) => arguments.clone(),
        other => {
            return Err(RoutingError::invalid_arguments(
                tool,
                format!("expected an object, got {}", json_type(other)),
            ));
        }
    };
    serde_json::from_value(object)
        .map_err(|error| RoutingError::invalid_arguments(tool, error.to_string()))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorKind;

    #[rstest]
    #[case::canonical(json!({"input": "x", "flags": ["--a"], "handlerOverride": "h"}))]
    #[case::args_alias(json!({"args": "x", "flags": ["--a"], "handler_override": "h"}))]
    #[case::persona_alias(json!({"args": "x", "flags": ["--a"], "persona": "h", "auto_route": true}))]
    fn command_arguments_accept_aliases(#[case] arguments: Value) {
        let request = dispatch_request("ns:cmd", &arguments).expect("decodes");
        assert_eq!(
            request,
            DispatchRequest::with_input("x")
                .flags(["--a"])
                .handler_override("h")
        );
    }

    #[test]
    fn null_arguments_mean_empty_request() {
        let request = dispatch_request("ns:cmd", &Value::Null).expect("decodes");
        assert_eq!(request, DispatchRequest::default());
    }

    #[test]
    fn blank_override_is_ignored() {
        let request =
            dispatch_request("ns:cmd", &json!({"persona": "  "})).expect("decodes");
        assert_eq!(request.handler_override, None);
    }

    #[rstest]
    #[case(json!("text"))]
    #[case(json!([1, 2]))]
    #[case(json!({"flags": "--not-a-list"}))]
    fn malformed_arguments_are_rejected(#[case] arguments: Value) {
        let error = dispatch_request("ns:cmd", &arguments).expect_err("rejected");
        assert_eq!(error.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn history_limit_defaults() {
        let decoded: HistoryArguments = decode("sc:history", &Value::Null).expect("decodes");
        assert_eq!(decoded.limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn persona_action_is_required() {
        let error = decode::<PersonaArguments>("sc:persona", &json!({})).expect_err("missing");
        assert_eq!(error.kind(), ErrorKind::InvalidArguments);
    }
}

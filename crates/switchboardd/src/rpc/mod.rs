//! JSON-RPC 2.0 method handling over the routing tool surface.
//!
//! The handler is transport-agnostic: it turns one request line into at most
//! one response. Notifications are processed but never answered.

mod errors;
mod request;
mod response;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use switchboard_routing::ToolSurface;

pub use errors::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, RpcError,
};
pub use request::{RejectedRequest, RpcRequest};
pub use response::{ErrorObject, RpcResponse};

/// Tracing target for protocol handling.
pub(crate) const RPC_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::rpc");

/// Protocol revision announced during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Name announced in `serverInfo`.
pub const SERVER_NAME: &str = "switchboard";

const INITIALIZE: &str = "initialize";
const PING: &str = "ping";
const TOOLS_LIST: &str = "tools/list";
const TOOLS_CALL: &str = "tools/call";
const NOTIFICATION_PREFIX: &str = "notifications/";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: &'static str,
    capabilities: ServerCapabilities,
    server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Answers JSON-RPC requests using a [`ToolSurface`].
#[derive(Debug)]
pub struct RpcHandler {
    surface: ToolSurface,
}

impl RpcHandler {
    /// Wraps a tool surface.
    #[must_use]
    pub const fn new(surface: ToolSurface) -> Self {
        Self { surface }
    }

    /// Underlying tool surface.
    #[must_use]
    pub const fn surface(&self) -> &ToolSurface {
        &self.surface
    }

    /// Handles one request line.
    ///
    /// Returns `None` when the line was a notification.
    #[must_use]
    pub fn handle_line(&self, line: &[u8]) -> Option<RpcResponse> {
        match RpcRequest::parse(line) {
            Ok(request) => self.handle(request),
            Err(rejected) => {
                warn!(target: RPC_TARGET, error = %rejected.error, "rejected request");
                Some(RpcResponse::failure(rejected.id, &rejected.error))
            }
        }
    }

    /// Handles a decoded request.
    #[must_use]
    pub fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!(
            target: RPC_TARGET,
            method = request.method(),
            notification = request.is_notification(),
            "handling request"
        );
        let outcome = self.invoke(&request);
        let Some(id) = request.into_id() else {
            if let Err(error) = outcome {
                debug!(target: RPC_TARGET, %error, "notification failed");
            }
            return None;
        };
        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => {
                warn!(target: RPC_TARGET, %error, "request failed");
                RpcResponse::failure(id, &error)
            }
        })
    }

    fn invoke(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        match request.method() {
            INITIALIZE => to_result(&InitializeResult {
                protocol_version: PROTOCOL_VERSION,
                capabilities: ServerCapabilities {
                    tools: ToolsCapability {
                        list_changed: false,
                    },
                },
                server_info: ServerInfo {
                    name: SERVER_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                },
            }),
            PING => Ok(json!({})),
            TOOLS_LIST => Ok(json!({ "tools": to_result(&self.surface.list())? })),
            TOOLS_CALL => self.call_tool(request.params()),
            method if method.starts_with(NOTIFICATION_PREFIX) => Ok(Value::Null),
            other => Err(RpcError::method_not_found(other)),
        }
    }

    fn call_tool(&self, params: &Value) -> Result<Value, RpcError> {
        let call: CallParams = serde_json::from_value(params.clone())
            .map_err(|error| RpcError::invalid_params(error.to_string()))?;
        to_result(&self.surface.call(&call.name, &call.arguments))
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|error| RpcError::internal(error.to_string()))
}

#[cfg(test)]
mod tests;

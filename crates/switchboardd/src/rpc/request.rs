//! Request decoding for the JSON-RPC loop.
//!
//! A line is decoded in two steps: first as arbitrary JSON (failures are
//! parse errors), then as a JSON-RPC 2.0 request object (failures are invalid
//! requests). The request id is recovered whenever possible so the error
//! response can be correlated by the client.

use serde_json::{Map, Value};

use super::errors::RpcError;

const JSONRPC_VERSION: &str = "2.0";

/// A decoded JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    id: Option<Value>,
    method: String,
    params: Value,
}

/// A line that could not be decoded, with the id to answer under.
#[derive(Debug)]
pub struct RejectedRequest {
    /// Id recovered from the request, or `null`.
    pub id: Value,
    /// Reason the request was rejected.
    pub error: RpcError,
}

impl RejectedRequest {
    fn new(id: Value, error: RpcError) -> Self {
        Self { id, error }
    }
}

impl RpcRequest {
    /// Decodes one request line.
    ///
    /// # Errors
    ///
    /// Returns a [`RejectedRequest`] carrying [`RpcError::Parse`] when the
    /// line is not JSON, or [`RpcError::InvalidRequest`] when it is JSON but
    /// not a single JSON-RPC 2.0 request object.
    pub fn parse(line: &[u8]) -> Result<Self, RejectedRequest> {
        let value: Value = serde_json::from_slice(line)
            .map_err(|error| RejectedRequest::new(Value::Null, RpcError::parse(&error)))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, RejectedRequest> {
        let mut object = match value {
            Value::Object(object) => object,
            Value::Array(_) => {
                return Err(RejectedRequest::new(
                    Value::Null,
                    RpcError::invalid_request("batch requests are not supported"),
                ));
            }
            _ => {
                return Err(RejectedRequest::new(
                    Value::Null,
                    RpcError::invalid_request("request must be a JSON object"),
                ));
            }
        };

        let id = take_id(&mut object)?;
        let reject = |message: &str| {
            RejectedRequest::new(
                id.clone().unwrap_or(Value::Null),
                RpcError::invalid_request(message),
            )
        };

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(reject("jsonrpc must be \"2.0\""));
        }
        let Some(Value::String(method)) = object.remove("method") else {
            return Err(reject("method must be a string"));
        };
        let params = object.remove("params").unwrap_or(Value::Null);
        if !matches!(params, Value::Null | Value::Object(_) | Value::Array(_)) {
            return Err(reject("params must be an object or an array"));
        }

        Ok(Self { id, method, params })
    }

    /// Request id; `None` for notifications.
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Returns `true` when no reply is expected.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Method parameters; `null` when absent.
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// Consumes the request, returning its id.
    #[must_use]
    pub fn into_id(self) -> Option<Value> {
        self.id
    }
}

fn take_id(object: &mut Map<String, Value>) -> Result<Option<Value>, RejectedRequest> {
    match object.remove("id") {
        None => Ok(None),
        Some(id @ (Value::Null | Value::String(_) | Value::Number(_))) => Ok(Some(id)),
        Some(_) => Err(RejectedRequest::new(
            Value::Null,
            RpcError::invalid_request("id must be a string, a number or null"),
        )),
    }
}

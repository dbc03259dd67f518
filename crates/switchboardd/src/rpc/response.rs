//! Response frames written back to the client.

use serde::Serialize;
use serde_json::Value;

use super::errors::RpcError;

/// A JSON-RPC 2.0 response object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    code: i64,
    message: String,
}

impl RpcResponse {
    /// Builds a success response.
    #[must_use]
    pub const fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Builds an error response from a protocol error.
    #[must_use]
    pub fn failure(id: Value, error: &RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            outcome: Outcome::Error(ErrorObject {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }

    /// Id the response answers.
    #[must_use]
    pub const fn id(&self) -> &Value {
        &self.id
    }

    /// Result payload, when the call succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            Outcome::Error(_) => None,
        }
    }

    /// Error code, when the call failed.
    #[must_use]
    pub const fn error_code(&self) -> Option<i64> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(error) => Some(error.code),
        }
    }
}

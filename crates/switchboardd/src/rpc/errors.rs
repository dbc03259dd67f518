//! Protocol-level failures and their JSON-RPC error codes.
//!
//! Routing failures never appear here: a failed tool call is still a
//! successful RPC exchange whose result carries `isError: true`.

use thiserror::Error;

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32_700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32_600;
/// The method does not exist.
pub const METHOD_NOT_FOUND: i64 = -32_601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i64 = -32_602;
/// Internal server error.
pub const INTERNAL_ERROR: i64 = -32_603;

/// Errors reported to the client as JSON-RPC error objects.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request line was not valid JSON.
    #[error("parse error: {message}")]
    Parse {
        /// Decoder diagnostic.
        message: String,
    },

    /// The JSON value was not a JSON-RPC 2.0 request.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// What made the request invalid.
        message: String,
    },

    /// The request line exceeded the size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes read before the line was abandoned.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },

    /// No handler exists for the method.
    #[error("method not found: {method}")]
    MethodNotFound {
        /// Requested method name.
        method: String,
    },

    /// The method parameters did not decode.
    #[error("invalid params: {message}")]
    InvalidParams {
        /// Decoder diagnostic.
        message: String,
    },

    /// The server failed to build a result.
    #[error("internal error: {message}")]
    Internal {
        /// Failure description.
        message: String,
    },
}

impl RpcError {
    /// Creates a parse error from a JSON decoding failure.
    #[must_use]
    pub fn parse(error: &serde_json::Error) -> Self {
        Self::Parse {
            message: error.to_string(),
        }
    }

    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a request-too-large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Creates a method-not-found error.
    #[must_use]
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    /// Creates an invalid-params error.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the JSON-RPC error code for this error.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Parse { .. } => PARSE_ERROR,
            Self::InvalidRequest { .. } | Self::RequestTooLarge { .. } => INVALID_REQUEST,
            Self::MethodNotFound { .. } => METHOD_NOT_FOUND,
            Self::InvalidParams { .. } => INVALID_PARAMS,
            Self::Internal { .. } => INTERNAL_ERROR,
        }
    }
}

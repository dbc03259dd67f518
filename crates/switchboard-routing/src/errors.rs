//! Error types surfaced by routing operations.
//!
//! Every failure carries a stable [`ErrorKind`] so the RPC boundary can render
//! it as a structured, error-shaped response. Routing is deterministic, so no
//! variant is ever retried.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Stable classification of a [`RoutingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested command or tool is not in the catalog.
    UnknownCommand,
    /// A named handler is not in the catalog.
    UnknownHandler,
    /// The catalog failed load-time validation.
    InvalidCatalog,
    /// Tool arguments could not be decoded.
    InvalidArguments,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownCommand => "UnknownCommand",
            Self::UnknownHandler => "UnknownHandler",
            Self::InvalidCatalog => "InvalidCatalog",
            Self::InvalidArguments => "InvalidArguments",
        }
    }
}

/// Errors surfaced while routing a request.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Command name absent from the catalog.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// Requested command name.
        command: String,
    },

    /// Handler name absent from the catalog.
    #[error("unknown handler: {handler}")]
    UnknownHandler {
        /// Requested handler name.
        handler: String,
    },

    /// Catalog failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),

    /// Tool arguments are missing or malformed.
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// Tool that received the arguments.
        tool: String,
        /// Decoder diagnostic.
        message: String,
    },
}

impl RoutingError {
    /// Returns the stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::UnknownHandler { .. } => ErrorKind::UnknownHandler,
            Self::InvalidCatalog(_) => ErrorKind::InvalidCatalog,
            Self::InvalidArguments { .. } => ErrorKind::InvalidArguments,
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an unknown handler error.
    pub fn unknown_handler(handler: impl Into<String>) -> Self {
        Self::UnknownHandler {
            handler: handler.into(),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

//! Load-time catalog failures.
//!
//! Every variant describes a referential-integrity or parsing problem found
//! while building a [`Catalog`](super::Catalog). None of them can be recovered
//! at runtime: the server refuses to start until the catalog is fixed.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading and validating a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Catalog document is not valid YAML or does not match the schema.
    #[error("malformed catalog document: {message}")]
    Parse {
        /// Decoder diagnostic.
        message: String,
    },

    /// Two entries of the same kind share a name.
    #[error("duplicate {kind} '{name}'")]
    DuplicateName {
        /// Entry kind, such as `command`.
        kind: &'static str,
        /// Repeated name.
        name: String,
    },

    /// A command or handler references an integration that is not declared.
    #[error("{owner} references unknown integration '{integration}'")]
    UnknownIntegration {
        /// Referencing command or handler.
        owner: String,
        /// Undeclared integration name.
        integration: String,
    },

    /// A command's handler roster names a handler that is not declared.
    #[error("command '{command}' allows unknown handler '{handler}'")]
    UnknownHandler {
        /// Command whose roster is invalid.
        command: String,
        /// Undeclared handler name.
        handler: String,
    },

    /// A handler specialises in a command that is not declared.
    #[error("handler '{handler}' specialises in unknown command '{command}'")]
    UnknownCommand {
        /// Handler with the stale specialisation.
        handler: String,
        /// Undeclared command name.
        command: String,
    },

    /// The designated fallback handler is not declared.
    #[error("default handler '{handler}' is not declared")]
    UnknownDefaultHandler {
        /// Configured default handler.
        handler: String,
    },

    /// A command claims a name reserved for a management tool.
    #[error("command name '{name}' is reserved for a management tool")]
    ReservedName {
        /// Offending command name.
        name: String,
    },

    /// A rule pattern failed to compile.
    #[error("invalid {rule} pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Rule table the pattern belongs to.
        rule: &'static str,
        /// Pattern source text.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}

impl CatalogError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a duplicate name error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Creates a dangling integration reference error.
    pub fn unknown_integration(owner: impl Into<String>, integration: impl Into<String>) -> Self {
        Self::UnknownIntegration {
            owner: owner.into(),
            integration: integration.into(),
        }
    }

    /// Creates a dangling handler reference error.
    pub fn unknown_handler(command: impl Into<String>, handler: impl Into<String>) -> Self {
        Self::UnknownHandler {
            command: command.into(),
            handler: handler.into(),
        }
    }

    /// Creates a dangling command reference error.
    pub fn unknown_command(handler: impl Into<String>, command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            handler: handler.into(),
            command: command.into(),
        }
    }

    /// Creates an undeclared default handler error.
    pub fn unknown_default_handler(handler: impl Into<String>) -> Self {
        Self::UnknownDefaultHandler {
            handler: handler.into(),
        }
    }

    /// Creates a reserved name error.
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(
        rule: &'static str,
        pattern: impl Into<String>,
        source: &regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            rule,
            pattern: pattern.into(),
            message: source.to_string(),
        }
    }
}

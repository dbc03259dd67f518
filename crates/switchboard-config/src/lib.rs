//! Shared configuration for the Switchboard routing server.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults are
//! overridden by a configuration file, then by `SWITCHBOARD_*` environment
//! variables, then by command-line flags. The server reads the resolved
//! [`Config`] once during bootstrap and never mutates it afterwards.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_FILTER, default_history_capacity, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use ortho_config::{OrthoConfig, OrthoError};

/// Environment variable prefix shared by every configuration key.
pub const ENV_PREFIX: &str = "SWITCHBOARD_";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SWITCHBOARD")]
pub struct Config {
    /// `tracing` filter expression applied to the stderr log stream.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of the stderr log stream.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// YAML catalog replacing the built-in command catalog.
    pub catalog_path: Option<Utf8PathBuf>,
    /// Routing history entries retained in memory; `0` keeps every entry.
    #[ortho_config(default = default_history_capacity())]
    pub history_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            catalog_path: None,
            history_capacity: default_history_capacity(),
        }
    }
}

impl Config {
    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the catalog override path, if one was configured.
    #[must_use]
    pub fn catalog_path(&self) -> Option<&Utf8Path> {
        self.catalog_path.as_deref()
    }

    /// Returns the history capacity, or `None` when history is unbounded.
    #[must_use]
    pub fn history_limit(&self) -> Option<usize> {
        (self.history_capacity > 0).then_some(self.history_capacity)
    }
}

//! Built-in configuration defaults.

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Number of routing history entries retained before the oldest are evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1024;

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned copy of [`DEFAULT_LOG_FILTER`] for the derived defaults.
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Default routing history capacity.
pub fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

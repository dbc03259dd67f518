//! Structured logging for the server process.
//!
//! Every event goes to stderr. Stdout carries protocol frames only.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan};

use switchboard_config::{Config, LogFormat};

/// Format chosen by the first successful installation.
static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format of the stderr log stream for this process.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Reasons the log stream could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Some other subscriber already owns the global slot.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config`.
///
/// Only the first call installs anything. Later calls report the format that
/// won and leave the global subscriber alone.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter expression and
/// [`TelemetryError::Subscriber`] when another subscriber is already global.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| install(config).map(|()| config.log_format()))
        .map(|format| TelemetryHandle { format: *format })
}

fn parse_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|error| TelemetryError::Filter(error.to_string()))
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let base = fmt::Subscriber::builder()
        .with_env_filter(parse_filter(config.log_filter())?)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_span_events(FmtSpan::NONE)
        .with_target(true);

    let outcome = match config.log_format() {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(base.json().flatten_event(true).finish())
        }
        LogFormat::Compact => tracing::subscriber::set_global_default(base.compact().finish()),
    };
    outcome.map_err(TelemetryError::Subscriber)
}

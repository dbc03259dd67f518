//! Stdio server for the Switchboard command router.
//!
//! Bootstrap loads the layered [`switchboard_config::Config`], installs
//! structured telemetry on stderr, then loads and validates the command
//! catalog. An invalid catalog is fatal here: no request is served until every
//! cross-reference in the catalog resolves.
//!
//! Once running, the server reads newline-delimited JSON-RPC 2.0 requests and
//! answers `initialize`, `ping`, `tools/list` and `tools/call`. Tool calls are
//! forwarded to [`switchboard_routing::ToolSurface`]; routing failures come
//! back as error-shaped tool results while protocol failures use JSON-RPC
//! error codes. Health hooks emit a structured event at each bootstrap stage.

mod bootstrap;
mod health;
pub mod rpc;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Server, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;

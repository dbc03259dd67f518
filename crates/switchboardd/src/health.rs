//! Structured health reporting for server lifecycle events.

use std::sync::Arc;

use camino::Utf8Path;
use switchboard_config::Config;
use switchboard_routing::Catalog;

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Receives bootstrap milestones, in order, for one startup attempt.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked once the catalog has loaded and validated.
    ///
    /// `source` is `None` for the built-in catalog.
    fn catalog_loaded(&self, catalog: &Catalog, source: Option<&Utf8Path>);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn catalog_loaded(&self, catalog: &Catalog, source: Option<&Utf8Path>) {
        (**self).catalog_loaded(catalog, source);
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }
}

/// Reporter that turns each milestone into one `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting server bootstrap"
        );
    }

    fn catalog_loaded(&self, catalog: &Catalog, source: Option<&Utf8Path>) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "catalog_loaded",
            source = source.map_or("builtin", Utf8Path::as_str),
            commands = catalog.commands().len(),
            handlers = catalog.handlers().len(),
            integrations = catalog.integrations().len(),
            default_handler = catalog.default_handler(),
            "catalog ready"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            history_capacity = config.history_capacity,
            "server bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "server bootstrap failed"
        );
    }
}

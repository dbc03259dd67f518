//! Server bootstrap orchestration.
//!
//! Bootstrap runs configuration, telemetry, then catalog loading. The catalog
//! is validated in full before any request is accepted, so an invalid catalog
//! stops the server at startup rather than failing individual calls.

use std::io::{BufRead, Write};
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use switchboard_config::Config;
use switchboard_routing::{Catalog, CatalogError, Dispatcher, RoutingHistory, ToolSurface};

use crate::health::HealthReporter;
use crate::rpc::RpcHandler;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{self, ServeSummary, TransportError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the server configuration.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any source is malformed.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that returns a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already-resolved configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The catalog could not be read or failed validation.
    #[error("invalid catalog: {source}")]
    Catalog {
        /// Underlying catalog error.
        #[source]
        source: CatalogError,
    },
}

/// Result of a successful bootstrap.
#[derive(Debug)]
pub struct Server {
    config: Config,
    rpc: RpcHandler,
    telemetry: TelemetryHandle,
}

impl Server {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// The tool surface answering calls.
    #[must_use]
    pub const fn tools(&self) -> &ToolSurface {
        self.rpc.surface()
    }

    /// The protocol handler.
    #[must_use]
    pub const fn rpc(&self) -> &RpcHandler {
        &self.rpc
    }

    /// Serves newline-delimited requests until `reader` closes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when either stream fails.
    pub fn serve<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> Result<ServeSummary, TransportError> {
        transport::serve(&self.rpc, reader, writer)
    }
}

/// Bootstraps the server using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first stage that fails; the reporter
/// sees the same error first.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &Arc<dyn HealthReporter>,
) -> Result<Server, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => return Err(fail(reporter, BootstrapError::Configuration { source })),
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => return Err(fail(reporter, BootstrapError::Telemetry { source })),
    };

    let catalog = match Catalog::load(config.catalog_path()) {
        Ok(catalog) => catalog,
        Err(source) => return Err(fail(reporter, BootstrapError::Catalog { source })),
    };
    reporter.catalog_loaded(&catalog, config.catalog_path());

    let dispatcher = Dispatcher::new(
        Arc::new(catalog),
        RoutingHistory::with_capacity(config.history_limit()),
    );
    reporter.bootstrap_succeeded(&config);

    Ok(Server {
        config,
        rpc: RpcHandler::new(ToolSurface::new(dispatcher)),
        telemetry,
    })
}

fn fail(reporter: &Arc<dyn HealthReporter>, error: BootstrapError) -> BootstrapError {
    reporter.bootstrap_failed(&error);
    error
}

//! Configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use switchboard_config::Config;
use tempfile::TempDir;

use crate::bootstrap::ConfigLoader;

/// A catalog document written to a temporary directory.
pub struct CatalogFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl CatalogFile {
    /// Writes `document` to `catalog.yaml` in a fresh directory.
    pub fn write(document: &str) -> Self {
        let dir = TempDir::new().expect("temporary catalog directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("catalog.yaml"))
            .expect("temporary path is UTF-8");
        fs::write(&path, document).expect("write catalog");
        Self { _dir: dir, path }
    }

    /// Location of the catalog file.
    pub fn path(&self) -> Utf8PathBuf {
        self.path.clone()
    }
}

/// Loader returning a default configuration with optional overrides.
#[derive(Debug, Default)]
pub struct TestConfigLoader {
    catalog_path: Option<Utf8PathBuf>,
    history_capacity: Option<usize>,
}

impl TestConfigLoader {
    /// Points the configuration at a catalog file.
    pub fn with_catalog(mut self, path: Utf8PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Overrides the history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let defaults = Config::default();
        Ok(Config {
            catalog_path: self.catalog_path.clone(),
            history_capacity: self.history_capacity.unwrap_or(defaults.history_capacity),
            ..defaults
        })
    }
}

/// Loader that fails by passing an unknown log format on the command line.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("switchboardd"),
            OsString::from("--log-format"),
            OsString::from("pretty"),
        ];
        Config::load_from_iter(args)
    }
}

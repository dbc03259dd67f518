//! Test harness utilities for the server behavioural suites.

mod config_loader;
mod reporter;
mod world;

pub use config_loader::{CatalogFile, FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use world::{SessionWorld, TestWorld};

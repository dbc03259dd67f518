//! Entry point for the `switchboardd` binary.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use switchboardd::{HealthReporter, StructuredHealthReporter, SystemConfigLoader, bootstrap_with};

fn main() -> ExitCode {
    let reporter: Arc<dyn HealthReporter> = Arc::new(StructuredHealthReporter::new());
    let server = match bootstrap_with(&SystemConfigLoader, &reporter) {
        Ok(server) => server,
        Err(error) => {
            // Telemetry may not be installed yet.
            writeln!(io::stderr(), "switchboardd: {error}").ok();
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match server.serve(stdin, stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(
                target: concat!(env!("CARGO_PKG_NAME"), "::transport"),
                %error,
                "serve loop failed"
            );
            ExitCode::FAILURE
        }
    }
}

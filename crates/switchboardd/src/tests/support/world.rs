//! BDD worlds: bootstrap state and a scripted stdio session.

use std::io::Cursor;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::bootstrap::{BootstrapError, ConfigLoader, Server, bootstrap_with};
use crate::health::HealthReporter;

use super::config_loader::{CatalogFile, TestConfigLoader};
use super::reporter::{HealthEvent, RecordingHealthReporter};

/// Scenario world for bootstrap scenarios.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    reporter: Arc<RecordingHealthReporter>,
    catalog: Option<CatalogFile>,
    server: Option<Server>,
    bootstrap_error: Option<BootstrapError>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::default()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            catalog: None,
            server: None,
            bootstrap_error: None,
        }
    }

    /// Installs a loader.
    pub fn use_loader(&mut self, loader: impl ConfigLoader + 'static) {
        self.loader = Box::new(loader);
    }

    /// Writes a catalog file and installs a loader pointing at it.
    pub fn use_catalog(&mut self, document: &str) {
        let file = CatalogFile::write(document);
        self.loader = Box::new(TestConfigLoader::default().with_catalog(file.path()));
        self.catalog = Some(file);
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.server.is_some() || self.bootstrap_error.is_some() {
            return;
        }
        let reporter: Arc<dyn HealthReporter> = self.reporter.clone();
        match bootstrap_with(&*self.loader, &reporter) {
            Ok(server) => self.server = Some(server),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// The bootstrapped server, if any.
    pub fn server(&self) -> Option<&Server> {
        self.server.as_ref()
    }

    /// The bootstrap error, if any.
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Health events recorded so far.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.reporter.events()
    }
}

/// Scenario world for a scripted client session over the serve loop.
pub struct SessionWorld {
    server: Server,
    input: Vec<u8>,
    next_id: i64,
    responses: Vec<Value>,
}

impl SessionWorld {
    /// Bootstraps a server with the built-in catalog.
    pub fn new() -> Self {
        let reporter: Arc<dyn HealthReporter> = Arc::new(RecordingHealthReporter::default());
        let server = bootstrap_with(&TestConfigLoader::default(), &reporter)
            .expect("bootstrap with built-in catalog");
        Self {
            server,
            input: Vec::new(),
            next_id: 1,
            responses: Vec::new(),
        }
    }

    /// Queues a request and returns its id.
    pub fn request(&mut self, method: &str, params: &Value) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.queue(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}));
        id
    }

    /// Queues a notification.
    pub fn notify(&mut self, method: &str) {
        self.queue(&json!({"jsonrpc": "2.0", "method": method}));
    }

    /// Queues raw bytes followed by a newline.
    pub fn queue_raw(&mut self, line: &[u8]) {
        self.input.extend_from_slice(line);
        self.input.push(b'\n');
    }

    fn queue(&mut self, message: &Value) {
        let line = serde_json::to_vec(message).expect("serialise request");
        self.queue_raw(&line);
    }

    /// Feeds the queued input through the serve loop.
    pub fn run(&mut self) {
        let mut output = Vec::new();
        self.server
            .serve(Cursor::new(std::mem::take(&mut self.input)), &mut output)
            .expect("serve loop");
        self.responses = String::from_utf8(output)
            .expect("utf-8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("response is JSON"))
            .collect();
    }

    /// All response frames from the last run.
    pub fn responses(&self) -> &[Value] {
        &self.responses
    }

    /// The response carrying `id`.
    pub fn response_to(&self, id: i64) -> &Value {
        self.responses
            .iter()
            .find(|response| response.get("id") == Some(&json!(id)))
            .unwrap_or_else(|| panic!("no response to request {id}"))
    }

    /// The server under test.
    pub fn server(&self) -> &Server {
        &self.server
    }
}

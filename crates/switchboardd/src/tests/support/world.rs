//! Scenario world driving [`Controller::operate`] end to end.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

use super::{
    RecordingHealthReporter, ShutdownTrigger, TestTransportFactory, TriggeredShutdown,
};
use crate::bootstrap::{ConfigLoader, FileConfigLoader};
use crate::dispatch::{Request, Response};
use crate::health::HealthReporter;
use crate::lifecycle::{Controller, OperateError};
use crate::pump::PumpReport;
use crate::transport::Submitter;

type Outcome = Result<PumpReport, OperateError>;

/// Scenario world shared across lifecycle steps.
pub struct ServiceWorld {
    config_dir: TempDir,
    pub reporter: Arc<RecordingHealthReporter>,
    pub factory: Arc<TestTransportFactory>,
    submitter: Option<Submitter>,
    trigger: Option<ShutdownTrigger>,
    running: Option<JoinHandle<Outcome>>,
    outcome: Option<Outcome>,
    pub responses: Vec<Response>,
}

impl ServiceWorld {
    /// Builds a world with an in-memory transport and no configuration file.
    pub fn new() -> Self {
        let (factory, submitter) = TestTransportFactory::memory(4);
        Self {
            config_dir: TempDir::new().expect("temporary config directory"),
            reporter: Arc::new(RecordingHealthReporter::default()),
            factory,
            submitter: Some(submitter),
            trigger: None,
            running: None,
            outcome: None,
            responses: Vec::new(),
        }
    }

    /// Path the loader reads from.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config").join("config.json")
    }

    /// Writes a configuration document to [`Self::config_path`].
    pub fn write_config(&self, document: &str) {
        let path = self.config_path();
        let parent = path.parent().expect("config path has a parent");
        fs::create_dir_all(parent).expect("create config directory");
        fs::write(path, document).expect("write config document");
    }

    /// Replaces the transport factory with one that always fails.
    pub fn use_failing_transport(&mut self) {
        self.factory = TestTransportFactory::failing();
        self.submitter = None;
    }

    /// Starts `operate` on a background thread.
    pub fn start(&mut self) {
        let (shutdown, trigger) = TriggeredShutdown::new();
        let loader: Box<dyn ConfigLoader> = Box::new(FileConfigLoader::new(self.config_path()));
        let reporter: Arc<dyn HealthReporter> = self.reporter.clone();
        let controller = Controller::new(loader, reporter, Arc::clone(&self.factory), shutdown);
        self.trigger = Some(trigger);
        self.running = Some(thread::spawn(move || controller.operate()));
    }

    /// Runs `operate` and waits for it; suitable when startup is expected to fail.
    pub fn operate(&mut self) {
        self.start();
        self.finish();
    }

    /// Sends a request through the in-memory transport and keeps the reply.
    pub fn call(&mut self, request: Request) {
        let submitter = self.submitter.as_ref().expect("service has a submitter");
        let response = submitter.call(request).expect("service answered");
        self.responses.push(response);
    }

    /// Fires the shutdown signal and waits for `operate` to return.
    pub fn shut_down(&mut self) {
        self.submitter = None;
        if let Some(trigger) = self.trigger.take() {
            trigger.fire();
        }
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(running) = self.running.take() {
            self.outcome = Some(running.join().expect("operate thread panicked"));
        }
    }

    /// Result of `operate`, once it has returned.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}

impl Default for ServiceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture-style constructor for the lifecycle world.
pub fn world() -> RefCell<ServiceWorld> {
    RefCell::new(ServiceWorld::new())
}

//! Top-level service lifecycle.
//!
//! [`Controller::operate`] runs the whole service: bootstrap, transport
//! creation, endpoint registration, serving until the inbound stream closes,
//! then teardown. Every collaborator is injected so the sequence can be driven
//! in-process; [`run_service`] wires the production ones.

mod shutdown;

use std::sync::Arc;
use std::thread;

use switchboard_config::{Config, DEFAULT_ENDPOINT};
use thiserror::Error;
use tracing::warn;

use crate::bootstrap::{BootstrapError, ConfigLoader, FileConfigLoader, bootstrap_with};
use crate::dispatch::Dispatcher;
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::pump::{PumpReport, ServiceState, run_pumps};
use crate::transport::{
    HttpTransportFactory, Inbound, TransportError, TransportFactory, TransportHandle,
};

pub use self::shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};

pub(crate) const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Fatal outcomes of [`Controller::operate`].
#[derive(Debug, Error)]
pub enum OperateError {
    /// Configuration or telemetry could not be prepared.
    #[error("Initialization failed: {0}")]
    Bootstrap(#[from] BootstrapError),
    /// The transport could not be created, registered or started.
    #[error("transport did not start: {0}")]
    Transport(#[source] TransportError),
    /// The transport's serving thread did not shut down cleanly.
    #[error("transport did not shut down cleanly: {0}")]
    Shutdown(#[source] TransportError),
}

/// Owns the service's collaborators and drives its lifecycle.
pub struct Controller<F, S> {
    loader: Box<dyn ConfigLoader>,
    reporter: Arc<dyn HealthReporter>,
    factory: F,
    shutdown: Option<S>,
    state: ServiceState,
}

impl<F, S> Controller<F, S>
where
    F: TransportFactory,
    S: ShutdownSignal + 'static,
{
    /// Builds a controller from its collaborators.
    pub fn new(
        loader: Box<dyn ConfigLoader>,
        reporter: Arc<dyn HealthReporter>,
        factory: F,
        shutdown: S,
    ) -> Self {
        Self {
            loader,
            reporter,
            factory,
            shutdown: Some(shutdown),
            state: ServiceState::NotStarted,
        }
    }

    /// Runs the service until the inbound stream closes.
    ///
    /// Returns the combined pump report on a clean stop.
    ///
    /// # Errors
    ///
    /// Returns [`OperateError::Bootstrap`] or [`OperateError::Transport`] when
    /// startup fails; no request is served in either case.
    pub fn operate(mut self) -> Result<PumpReport, OperateError> {
        self.advance(ServiceState::Initializing);
        let (config, inbound, handle) = match self.initialise() {
            Ok(ready) => ready,
            Err(error) => {
                self.advance(ServiceState::Stopped);
                return Err(error);
            }
        };

        self.reporter.serving(&served_url(&config, &handle));
        self.advance(ServiceState::Serving);
        self.watch_for_shutdown(&handle);

        let dispatcher = Dispatcher::new(Arc::clone(&config));
        let report = run_pumps(config.pump_workers, &inbound, &dispatcher);
        self.reporter.pump_stopped(&report);

        self.advance(ServiceState::Draining);
        handle.shutdown();
        let joined = handle.join();
        self.finalize();
        self.advance(ServiceState::Stopped);
        joined.map_err(OperateError::Shutdown)?;
        Ok(report)
    }

    fn initialise(&self) -> Result<(Arc<Config>, Inbound, Arc<TransportHandle>), OperateError> {
        let bootstrapped = bootstrap_with(&*self.loader, &*self.reporter)?;
        let config = Arc::clone(bootstrapped.config());
        let (inbound, handle) = self.start_transport(&config).map_err(|error| {
            self.reporter.transport_unavailable(&error);
            OperateError::Transport(error)
        })?;
        Ok((config, inbound, Arc::new(handle)))
    }

    fn start_transport(
        &self,
        config: &Arc<Config>,
    ) -> Result<(Inbound, TransportHandle), TransportError> {
        let mut transport = self.factory.create(config)?;
        let inbound = transport.register(DEFAULT_ENDPOINT)?;
        let handle = transport.start()?;
        Ok((inbound, handle))
    }

    /// Stops the transport when the shutdown signal fires.
    ///
    /// The watcher is detached: if the stream closes for another reason the
    /// thread stays parked on the signal until the process exits.
    fn watch_for_shutdown(&mut self, handle: &Arc<TransportHandle>) {
        let Some(signal) = self.shutdown.take() else {
            return;
        };
        let handle = Arc::clone(handle);
        thread::spawn(move || match signal.wait() {
            Ok(()) => handle.shutdown(),
            Err(error) => warn!(
                target: LIFECYCLE_TARGET,
                %error,
                "shutdown signal unavailable; serving until the transport closes"
            ),
        });
    }

    /// Releases service resources after the pumps have stopped.
    fn finalize(&self) {
        self.reporter.teardown_completed();
    }

    fn advance(&mut self, next: ServiceState) {
        let from = self.state;
        debug_assert!(
            from.can_advance_to(next),
            "illegal transition {from} -> {next}"
        );
        self.state = next;
        self.reporter.state_changed(from, next);
    }
}

fn served_url(config: &Config, handle: &TransportHandle) -> String {
    match handle.local_addr() {
        Some(addr) => format!(
            "{}://{}:{}/",
            config.protocol(),
            config.web_server.public_host,
            addr.port()
        ),
        None => config.base_url(),
    }
}

/// Runs the service with the production collaborators.
///
/// # Errors
///
/// See [`Controller::operate`].
pub fn run_service() -> Result<PumpReport, OperateError> {
    Controller::new(
        Box::new(FileConfigLoader::default()),
        Arc::new(StructuredHealthReporter::new()),
        HttpTransportFactory,
        SystemShutdownSignal,
    )
    .operate()
}

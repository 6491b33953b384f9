//! Structured health reporting for service lifecycle events.

use std::sync::Arc;

use switchboard_config::Config;

use crate::bootstrap::BootstrapError;
use crate::pump::{PumpReport, ServiceState};
use crate::transport::TransportError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when the transport cannot be created or started.
    fn transport_unavailable(&self, error: &TransportError);

    /// Invoked once the transport accepts requests at `url`.
    fn serving(&self, url: &str);

    /// Invoked whenever the service changes state.
    fn state_changed(&self, from: ServiceState, to: ServiceState);

    /// Invoked after every pump has drained the inbound stream.
    fn pump_stopped(&self, report: &PumpReport);

    /// Invoked after teardown has released service resources.
    fn teardown_completed(&self);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn transport_unavailable(&self, error: &TransportError) {
        (**self).transport_unavailable(error);
    }

    fn serving(&self, url: &str) {
        (**self).serving(url);
    }

    fn state_changed(&self, from: ServiceState, to: ServiceState) {
        (**self).state_changed(from, to);
    }

    fn pump_stopped(&self, report: &PumpReport) {
        (**self).pump_stopped(report);
    }

    fn teardown_completed(&self) {
        (**self).teardown_completed();
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting service bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            name = %config.web_server.name,
            protocol = config.protocol(),
            port = config.effective_port(),
            pump_workers = config.pump_workers,
            log_filter = %config.log_filter,
            log_format = %config.log_format,
            "service bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "Initialization failed"
        );
    }

    fn transport_unavailable(&self, error: &TransportError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "transport_unavailable",
            error = %error,
            "transport did not start"
        );
    }

    fn serving(&self, url: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "serving",
            url,
            "Web interface ready: {url}"
        );
    }

    fn state_changed(&self, from: ServiceState, to: ServiceState) {
        tracing::debug!(
            target: HEALTH_TARGET,
            event = "state_changed",
            from = %from,
            to = %to,
            "service state changed"
        );
    }

    fn pump_stopped(&self, report: &PumpReport) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "pump_stopped",
            processed = report.processed,
            undeliverable = report.undeliverable,
            "request pump stopped"
        );
    }

    fn teardown_completed(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "teardown_completed",
            "service teardown completed"
        );
    }
}

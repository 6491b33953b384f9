//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;

use switchboard_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::pump::{PumpReport, ServiceState};
use crate::transport::TransportError;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    TransportUnavailable(String),
    Serving(String),
    StateChanged(ServiceState, ServiceState),
    PumpStopped(PumpReport),
    TeardownCompleted,
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    /// Returns the states entered, in order.
    #[must_use]
    pub fn states(&self) -> Vec<ServiceState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HealthEvent::StateChanged(_, to) => Some(to),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn transport_unavailable(&self, error: &TransportError) {
        self.record(HealthEvent::TransportUnavailable(error.to_string()));
    }

    fn serving(&self, url: &str) {
        self.record(HealthEvent::Serving(url.to_owned()));
    }

    fn state_changed(&self, from: ServiceState, to: ServiceState) {
        self.record(HealthEvent::StateChanged(from, to));
    }

    fn pump_stopped(&self, report: &PumpReport) {
        self.record(HealthEvent::PumpStopped(*report));
    }

    fn teardown_completed(&self) {
        self.record(HealthEvent::TeardownCompleted);
    }
}

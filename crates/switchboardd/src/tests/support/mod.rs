//! Test harness utilities shared by the unit and behavioural suites.

mod reporter;
mod shutdown;
mod transport_factory;
mod world;

pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::{ShutdownTrigger, TriggeredShutdown};
pub use transport_factory::TestTransportFactory;
pub use world::{ServiceWorld, world};

use switchboard_config::Config;

/// Configuration with a distinctive error content type.
#[must_use]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.web_server.error_mime = "text/x-test-error".to_owned();
    config.log_filter = "warn".to_owned();
    config
}

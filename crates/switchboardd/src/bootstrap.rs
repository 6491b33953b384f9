//! Service bootstrap: configuration loading and telemetry.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use switchboard_config::{CONFIG_PATH, Config, ConfigError, load_config};

use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is missing or malformed.
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Loader that reads a JSON document from disk.
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    path: PathBuf,
}

impl FileConfigLoader {
    /// Reads configuration from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileConfigLoader {
    fn default() -> Self {
        Self::new(CONFIG_PATH)
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        load_config(&self.path)
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// Configuration loaded with telemetry installed.
#[derive(Debug, Clone)]
pub struct Bootstrapped {
    config: Arc<Config>,
}

impl Bootstrapped {
    /// Shared read-only configuration.
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }
}

/// Loads configuration and installs telemetry, reporting each outcome.
///
/// # Errors
///
/// Returns [`BootstrapError`] when either step fails; the error has already
/// been passed to `reporter`.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
) -> Result<Bootstrapped, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::from(source);
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    if let Err(source) = telemetry::initialise(&config) {
        let error = BootstrapError::Telemetry { source };
        reporter.bootstrap_failed(&error);
        return Err(error);
    }

    reporter.bootstrap_succeeded(&config);
    Ok(Bootstrapped {
        config: Arc::new(config),
    })
}

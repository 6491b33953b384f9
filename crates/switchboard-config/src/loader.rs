//! Reads and decodes the configuration document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Config;

/// Errors raised while loading the configuration document.
///
/// Both variants name the document path; callers only need to know that
/// loading failed, not which I/O sub-cause triggered it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be read (missing, unreadable, no permission).
    #[error("Could not open config file: '{path}'")]
    NotFound {
        /// Location of the configuration document.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The document was read but does not describe a valid configuration.
    #[error("Could not decode config file: '{path}': {message}")]
    Malformed {
        /// Location of the configuration document.
        path: PathBuf,
        /// Human-readable decoding failure.
        message: String,
        /// Decoder error, absent when a semantic check failed.
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl ConfigError {
    /// Path of the document that failed to load.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

/// Loads the configuration document at `path`.
///
/// Either a fully populated [`Config`] is returned or an error; a partially
/// decoded value never escapes.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the file cannot be read and
/// [`ConfigError::Malformed`] when it does not decode into a valid [`Config`].
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config =
        serde_json::from_slice(&content).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: source.to_string(),
            source: Some(source),
        })?;
    config.validate().map_err(|message| ConfigError::Malformed {
        path: path.to_path_buf(),
        message,
        source: None,
    })?;
    Ok(config)
}

//! Handler-level failures.
//!
//! These never escape a handler: they are rendered into a failure envelope
//! whose `Reason` is the error's display text.

use thiserror::Error;

/// Invalid input detected by a handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// A required parameter is absent.
    #[error("missing parameter '{name}'")]
    MissingParameter {
        /// Parameter key.
        name: &'static str,
    },

    /// A parameter is present but cannot be used.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter key.
        name: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}

impl HandlerError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

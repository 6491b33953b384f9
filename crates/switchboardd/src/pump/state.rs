//! Service lifecycle states.

use std::fmt;

/// Where the service is in its lifecycle.
///
/// Legal transitions:
///
/// ```text
/// NotStarted -> Initializing -> Serving -> Draining -> Stopped
///                    \-------------------------------> Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceState {
    /// Nothing has happened yet.
    #[default]
    NotStarted,
    /// Loading configuration and creating the transport.
    Initializing,
    /// Pumps are consuming the inbound stream.
    Serving,
    /// The inbound stream has closed; resources are being released.
    Draining,
    /// Terminal state.
    Stopped,
}

impl ServiceState {
    /// Returns the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Initializing => "initializing",
            Self::Serving => "serving",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }

    /// Returns `true` when moving to `next` is a legal transition.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Initializing)
                | (Self::Initializing, Self::Serving | Self::Stopped)
                | (Self::Serving, Self::Draining)
                | (Self::Draining, Self::Stopped)
        )
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

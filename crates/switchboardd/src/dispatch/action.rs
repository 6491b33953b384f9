//! Closed table of dispatchable actions.

use switchboard_config::Config;

use super::handlers::{self, Handler};
use super::{Request, Response};

/// Actions understood by the dispatcher.
///
/// `NotImplemented` is the fallback for every identifier that is missing or
/// not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Acknowledge the request without doing anything.
    DoNothing,
    /// Reflect the `message` parameter back to the caller.
    Echo,
    /// Fallback for unknown identifiers.
    NotImplemented,
}

impl Action {
    /// Actions reachable by identifier.
    pub const REGISTERED: [Self; 2] = [Self::DoNothing, Self::Echo];

    /// Resolves an action identifier using exact, case-sensitive matching.
    pub fn resolve(identifier: Option<&str>) -> Self {
        identifier
            .and_then(|id| Self::REGISTERED.into_iter().find(|action| action.as_str() == id))
            .unwrap_or(Self::NotImplemented)
    }

    /// Returns the canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoNothing => "do-nothing",
            Self::Echo => "echo",
            Self::NotImplemented => "not-implemented",
        }
    }

    pub(crate) fn handler(self) -> Handler {
        match self {
            Self::DoNothing => handlers::do_nothing,
            Self::Echo => handlers::echo,
            Self::NotImplemented => handlers::not_implemented,
        }
    }

    /// Runs this action's handler.
    pub(crate) fn invoke(self, request: &Request, config: &Config) -> Response {
        (self.handler())(request, config)
    }
}

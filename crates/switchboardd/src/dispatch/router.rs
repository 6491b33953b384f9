//! Routes requests to action handlers.

use std::sync::Arc;

use switchboard_config::Config;
use tracing::debug;

use super::{Action, Request, Response};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Maps requests to handlers through the [`Action`] table.
///
/// The dispatcher holds only read-only configuration, so one instance can be
/// shared by any number of pumps.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<Config>,
}

impl Dispatcher {
    /// Creates a dispatcher over shared configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Returns the configuration handlers read from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the handler selected by the request's action identifier.
    pub fn dispatch(&self, request: &Request) -> Response {
        let action = Action::resolve(request.action());
        debug!(
            target: DISPATCH_TARGET,
            action = action.as_str(),
            requested = request.action().unwrap_or_default(),
            "dispatching request"
        );
        action.invoke(request, &self.config)
    }
}

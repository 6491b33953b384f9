//! Request-dispatch service core.
//!
//! The service reads its configuration from `config/config.json`, starts an
//! HTTP(S) transport and routes every request sent to `/cgi-bin/service` by
//! its `cgi` parameter. Routing is a closed table ([`dispatch::Action`]);
//! unknown actions get a fixed diagnostic instead of an error.
//!
//! Data flows in one direction:
//!
//! 1. [`lifecycle::Controller`] loads configuration and creates a
//!    [`transport::Transport`].
//! 2. The transport yields [`transport::Exchange`]s, each a request plus a
//!    one-shot response sink.
//! 3. [`pump::ServicePump`] takes exchanges one at a time, runs the
//!    [`dispatch::Dispatcher`], and writes the response to that exchange's
//!    sink.
//! 4. Handlers build their payloads with [`envelope::encode`], which never
//!    fails outward.
//!
//! Startup failures are the only fatal errors. Every per-request failure is
//! turned into a well-formed response.

mod bootstrap;
pub mod dispatch;
pub mod envelope;
mod health;
pub mod lifecycle;
pub mod pump;
mod telemetry;
pub mod transport;

pub use bootstrap::{BootstrapError, Bootstrapped, ConfigLoader, FileConfigLoader, bootstrap_with};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use lifecycle::{Controller, OperateError, run_service};
pub use telemetry::TelemetryError;

#[cfg(test)]
mod tests;

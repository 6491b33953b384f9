//! Test suites for the service lifecycle and dispatch behaviour.

mod dispatch_behaviour;
mod support;

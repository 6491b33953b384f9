//! Action dispatch for inbound requests.
//!
//! A request carries a flat parameter map. The value under [`ACTION_KEY`]
//! names the action to run; [`Dispatcher`] resolves it against the closed
//! [`Action`] table and invokes the matching handler. Identifiers that do not
//! match exactly (case included) fall through to [`Action::NotImplemented`],
//! which answers with a fixed diagnostic body in the configured error content
//! type.
//!
//! ## Actions
//!
//! | Identifier   | Parameters                         | Reply                          |
//! |--------------|------------------------------------|--------------------------------|
//! | `do-nothing` | none                               | `{"Success": true, "Reason": ""}` |
//! | `echo`       | `message`, optional `repeat` 1..=16 | envelope plus `Message`        |
//!
//! Handlers never fail outward. Invalid parameters become a failure envelope
//! (`Success: false`) delivered as an ordinary response.

mod action;
mod errors;
mod handlers;
mod request;
mod response;
mod router;

pub use self::action::Action;
pub use self::errors::HandlerError;
pub use self::handlers::{ECHO_MAX_REPEAT, NOT_IMPLEMENTED_BODY};
pub use self::request::{ACTION_KEY, Request};
pub use self::response::{CONTENT_TYPE, Response};
pub use self::router::Dispatcher;

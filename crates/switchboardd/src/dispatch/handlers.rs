//! Handler implementations for each [`Action`](super::Action).

use serde::Serialize;
use switchboard_config::Config;

use super::errors::HandlerError;
use super::{Request, Response};
use crate::envelope::{self, Envelope};

/// Signature shared by every handler.
pub(crate) type Handler = fn(&Request, &Config) -> Response;

/// Body returned for unknown or missing action identifiers.
pub const NOT_IMPLEMENTED_BODY: &str = "This action is not implemented.";

/// Upper bound for the `echo` handler's `repeat` parameter.
pub const ECHO_MAX_REPEAT: usize = 16;

const MESSAGE_PARAM: &str = "message";
const REPEAT_PARAM: &str = "repeat";

pub(crate) fn do_nothing(_request: &Request, config: &Config) -> Response {
    reply(Ok(Envelope::succeeded()), config)
}

pub(crate) fn not_implemented(_request: &Request, config: &Config) -> Response {
    Response::new(config.error_mime(), NOT_IMPLEMENTED_BODY)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EchoReply {
    #[serde(flatten)]
    envelope: Envelope,
    message: String,
}

pub(crate) fn echo(request: &Request, config: &Config) -> Response {
    reply(echo_reply(request), config)
}

fn echo_reply(request: &Request) -> Result<EchoReply, HandlerError> {
    let message = request
        .param(MESSAGE_PARAM)
        .ok_or(HandlerError::MissingParameter {
            name: MESSAGE_PARAM,
        })?;
    let repeat = match request.param(REPEAT_PARAM) {
        Some(raw) => parse_repeat(raw)?,
        None => 1,
    };
    Ok(EchoReply {
        envelope: Envelope::succeeded(),
        message: vec![message; repeat].join(" "),
    })
}

fn parse_repeat(raw: &str) -> Result<usize, HandlerError> {
    let count: usize = raw
        .trim()
        .parse()
        .map_err(|_| HandlerError::invalid(REPEAT_PARAM, format!("'{raw}' is not a whole number")))?;
    if (1..=ECHO_MAX_REPEAT).contains(&count) {
        Ok(count)
    } else {
        Err(HandlerError::invalid(
            REPEAT_PARAM,
            format!("must be between 1 and {ECHO_MAX_REPEAT}, got {count}"),
        ))
    }
}

/// Encodes a handler result, turning errors into a failure envelope.
fn reply<T: Serialize>(result: Result<T, HandlerError>, config: &Config) -> Response {
    let encoded = match result {
        Ok(payload) => envelope::encode(&payload, config.error_mime()),
        Err(error) => envelope::encode(&Envelope::failed(error.to_string()), config.error_mime()),
    };
    encoded.into()
}

//! Canonical success/failure envelope and the JSON encoder used by handlers.
//!
//! Encoding never fails outward: when a value cannot be serialised the
//! encoder substitutes the error text as the body and labels it with the
//! configured error content type, so the pump always has a response to send.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::warn;

use crate::dispatch::Response;

/// Content type attached to successfully encoded JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const ENVELOPE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::envelope");

/// Two-field outcome record returned by handlers without domain payloads.
///
/// Field names follow the wire format expected by browser clients
/// (`Success`, `Reason`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    /// Whether the action completed.
    pub success: bool,
    /// Why the action failed; empty on success.
    pub reason: String,
}

impl Envelope {
    /// Builds an envelope from its parts.
    pub fn new(success: bool, reason: impl Into<String>) -> Self {
        Self {
            success,
            reason: reason.into(),
        }
    }

    /// A successful outcome with an empty reason.
    #[must_use]
    pub fn succeeded() -> Self {
        Self::new(true, "")
    }

    /// A failed outcome carrying `reason`.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::new(false, reason)
    }
}

/// Content type and body produced by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Value for the `Content-Type` header.
    pub content_type: String,
    /// Serialised payload.
    pub body: Vec<u8>,
}

impl From<Encoded> for Response {
    fn from(encoded: Encoded) -> Self {
        Self::new(encoded.content_type, encoded.body)
    }
}

/// Serialises `value` as tab-indented JSON.
///
/// On failure the error message becomes the body and `error_mime` the
/// content type.
pub fn encode<T>(value: &T, error_mime: &str) -> Encoded
where
    T: Serialize + ?Sized,
{
    match to_tabbed_json(value) {
        Ok(body) => Encoded {
            content_type: JSON_CONTENT_TYPE.to_owned(),
            body,
        },
        Err(error) => {
            warn!(
                target: ENVELOPE_TARGET,
                %error,
                "response serialisation failed; sending diagnostic body"
            );
            Encoded {
                content_type: error_mime.to_owned(),
                body: error.to_string().into_bytes(),
            }
        }
    }
}

fn to_tabbed_json<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Serializer;
    use serde::ser::Error as _;

    use super::*;

    const ERROR_MIME: &str = "text/plain; charset=utf-8";

    struct Unserialisable;

    impl Serialize for Unserialisable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialise"))
        }
    }

    #[rstest]
    #[case(true, "")]
    #[case(false, "backend unavailable")]
    #[case(false, "")]
    #[case(true, "grüße, 世界 🚀")]
    #[case(false, "quote \" and tab \t and newline \n")]
    fn envelope_survives_encoding(#[case] success: bool, #[case] reason: &str) {
        let encoded = encode(&Envelope::new(success, reason), ERROR_MIME);

        assert_eq!(encoded.content_type, JSON_CONTENT_TYPE);
        let decoded: Envelope = serde_json::from_slice(&encoded.body).expect("decode envelope");
        assert_eq!(decoded, Envelope::new(success, reason));
    }

    #[test]
    fn envelope_uses_wire_field_names_and_tabs() {
        let encoded = encode(&Envelope::succeeded(), ERROR_MIME);
        let text = String::from_utf8(encoded.body).expect("utf8 body");

        assert_eq!(text, "{\n\t\"Success\": true,\n\t\"Reason\": \"\"\n}");
    }

    #[test]
    fn serialisation_failure_degrades_to_diagnostic_body() {
        let encoded = encode(&Unserialisable, ERROR_MIME);

        assert_eq!(encoded.content_type, ERROR_MIME);
        assert_eq!(encoded.body, b"refusing to serialise".to_vec());
    }

    #[test]
    fn encoded_converts_into_response() {
        let response = Response::from(encode(&Envelope::failed("nope"), ERROR_MIME));

        assert_eq!(response.content_type(), Some(JSON_CONTENT_TYPE));
        assert!(!response.body().is_empty());
    }
}

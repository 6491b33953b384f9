//! Outbound response: headers plus an opaque body.

use std::collections::BTreeMap;

/// Header carrying the body's media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// A response produced exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl Response {
    /// Creates a response with the given content type and body.
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_owned(), content_type.into());
        Self {
            headers,
            body: body.into(),
        }
    }

    /// Returns the content type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Returns the value of header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns every header in name order.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

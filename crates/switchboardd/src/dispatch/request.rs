//! Inbound request parameters.
//!
//! Transports flatten whatever they receive (query strings, form bodies,
//! test fixtures) into a string-to-string map. Keys are unique; when a
//! transport sees a key twice the first value wins.

use std::collections::HashMap;

/// Parameter naming the action a request wants to run.
pub const ACTION_KEY: &str = "cgi";

/// Parsed inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    params: HashMap<String, String>,
}

impl Request {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request for `action` with no further parameters.
    pub fn for_action(action: impl Into<String>) -> Self {
        Self::new().with_param(ACTION_KEY, action)
    }

    /// Adds a parameter, keeping any earlier value for the same key.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builds a request from `application/x-www-form-urlencoded` bytes.
    ///
    /// Used for both query strings and form bodies; call
    /// [`Request::extend_from_form`] to merge a second source.
    pub fn from_form(input: &[u8]) -> Self {
        let mut request = Self::new();
        request.extend_from_form(input);
        request
    }

    /// Merges URL-encoded pairs into the map without overwriting.
    pub fn extend_from_form(&mut self, input: &[u8]) {
        for (key, value) in url::form_urlencoded::parse(input) {
            self.insert(key.into_owned(), value.into_owned());
        }
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Returns the value stored under `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the action identifier, if the request names one.
    pub fn action(&self) -> Option<&str> {
        self.param(ACTION_KEY)
    }

    /// Returns the full parameter map.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

impl<K, V> FromIterator<(K, V)> for Request
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (key, value) in iter {
            request.insert(key, value);
        }
        request
    }
}

//! Default values applied when the configuration document omits a field.

/// Relative location of the configuration document.
pub const CONFIG_PATH: &str = "config/config.json";

/// Endpoint path the service registers with its transport.
pub const DEFAULT_ENDPOINT: &str = "/cgi-bin/service";

/// Default plaintext port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default TLS port.
pub const DEFAULT_TLS_PORT: u16 = 8443;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Content type used for diagnostic (non-JSON) responses.
pub const DEFAULT_ERROR_MIME: &str = "text/plain; charset=utf-8";

/// Upper bound on a single request, headers and body included.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

pub(crate) fn default_name() -> String {
    "switchboard".to_owned()
}

pub(crate) const fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) const fn default_tls_port() -> u16 {
    DEFAULT_TLS_PORT
}

pub(crate) fn default_error_mime() -> String {
    DEFAULT_ERROR_MIME.to_owned()
}

pub(crate) fn default_bind_host() -> String {
    "0.0.0.0".to_owned()
}

pub(crate) fn default_public_host() -> String {
    "localhost".to_owned()
}

pub(crate) const fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}

pub(crate) fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

pub(crate) const fn default_pump_workers() -> usize {
    1
}

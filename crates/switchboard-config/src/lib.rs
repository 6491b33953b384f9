//! Shared configuration model for the switchboard service.
//!
//! The configuration document lives at a fixed path ([`CONFIG_PATH`]) and is
//! read exactly once at startup. Once [`load_config`] returns, the value is
//! never mutated; the service shares it read-only with every handler.

mod defaults;
mod loader;
mod logging;
mod port;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use defaults::{
    CONFIG_PATH, DEFAULT_ENDPOINT, DEFAULT_ERROR_MIME, DEFAULT_LOG_FILTER,
    DEFAULT_MAX_REQUEST_BYTES, DEFAULT_PORT, DEFAULT_TLS_PORT,
};
pub use loader::{ConfigError, load_config};
pub use logging::LogFormat;

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Transport settings consumed by the web server.
    pub web_server: WebServerConfig,
    /// Tracing filter expression (for example `info` or `switchboardd=debug`).
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Number of pump instances reading the shared inbound stream.
    #[serde(default = "defaults::default_pump_workers")]
    pub pump_workers: usize,
}

/// Settings for the HTTP(S) transport.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct WebServerConfig {
    /// Server name advertised in the `Server` response header.
    #[serde(rename = "Name", default = "defaults::default_name")]
    pub name: String,
    /// Plaintext listening port.
    #[serde(
        rename = "Port",
        default = "defaults::default_port",
        deserialize_with = "port::deserialize_port"
    )]
    pub port: u16,
    /// TLS listening port.
    #[serde(
        rename = "TLSPort",
        default = "defaults::default_tls_port",
        deserialize_with = "port::deserialize_port"
    )]
    pub tls_port: u16,
    /// Serve plaintext HTTP instead of TLS.
    #[serde(rename = "TLSDisabled", default)]
    pub tls_disabled: bool,
    /// PEM certificate chain presented when TLS is enabled.
    #[serde(rename = "TLSPublicKey", default)]
    pub tls_certificate: Option<PathBuf>,
    /// PEM private key matching [`Self::tls_certificate`].
    #[serde(rename = "TLSPrivateKey", default)]
    pub tls_private_key: Option<PathBuf>,
    /// Content type used for diagnostic responses.
    #[serde(rename = "ErrorMime", default = "defaults::default_error_mime")]
    pub error_mime: String,
    /// Directory served for plain `GET` requests outside the endpoint.
    #[serde(rename = "WebRoot", default)]
    pub web_root: Option<PathBuf>,
    /// Interface the listener binds to.
    #[serde(rename = "BindHost", default = "defaults::default_bind_host")]
    pub bind_host: String,
    /// Host name rendered in the advertised base URL.
    #[serde(rename = "PublicHost", default = "defaults::default_public_host")]
    pub public_host: String,
    /// Largest accepted request, headers and body included.
    #[serde(
        rename = "MaxRequestBytes",
        default = "defaults::default_max_request_bytes"
    )]
    pub max_request_bytes: usize,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            name: defaults::default_name(),
            port: DEFAULT_PORT,
            tls_port: DEFAULT_TLS_PORT,
            tls_disabled: false,
            tls_certificate: None,
            tls_private_key: None,
            error_mime: defaults::default_error_mime(),
            web_root: None,
            bind_host: defaults::default_bind_host(),
            public_host: defaults::default_public_host(),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_server: WebServerConfig::default(),
            log_filter: defaults::default_log_filter_string(),
            log_format: LogFormat::default(),
            pump_workers: defaults::default_pump_workers(),
        }
    }
}

impl Config {
    /// Returns the content type used for diagnostic responses.
    #[must_use]
    pub fn error_mime(&self) -> &str {
        &self.web_server.error_mime
    }

    /// Returns `true` when the service speaks TLS.
    #[must_use]
    pub const fn tls_enabled(&self) -> bool {
        !self.web_server.tls_disabled
    }

    /// Port the transport listens on: plaintext when TLS is disabled.
    #[must_use]
    pub const fn effective_port(&self) -> u16 {
        if self.web_server.tls_disabled {
            self.web_server.port
        } else {
            self.web_server.tls_port
        }
    }

    /// URL scheme matching [`Self::effective_port`].
    #[must_use]
    pub const fn protocol(&self) -> &'static str {
        if self.web_server.tls_disabled {
            "http"
        } else {
            "https"
        }
    }

    /// Base URL operators can reach the service on.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/",
            self.protocol(),
            self.web_server.public_host,
            self.effective_port()
        )
    }

    /// Certificate and key paths, when both are configured.
    #[must_use]
    pub fn tls_material(&self) -> Option<(&Path, &Path)> {
        let certificate = self.web_server.tls_certificate.as_deref()?;
        let key = self.web_server.tls_private_key.as_deref()?;
        Some((certificate, key))
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.pump_workers == 0 {
            return Err("PumpWorkers must be at least 1".to_owned());
        }
        if self.web_server.max_request_bytes == 0 {
            return Err("MaxRequestBytes must be positive".to_owned());
        }
        Ok(())
    }
}

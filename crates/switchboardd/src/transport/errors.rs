//! Error types for transport operations.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while creating, starting or feeding a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to resolve TCP address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("no TCP addresses resolved for {host}:{port}")]
    ResolveEmpty { host: String, port: u16 },
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to read listener address: {source}")]
    LocalAddr {
        #[source]
        source: io::Error,
    },
    #[error("TLS is enabled but TLSPublicKey and TLSPrivateKey are not both set")]
    TlsMaterialMissing,
    #[error("failed to read TLS material from {path}: {source}")]
    TlsMaterial {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no certificates found in {path}")]
    NoCertificates { path: PathBuf },
    #[error("no private key found in {path}")]
    NoPrivateKey { path: PathBuf },
    #[error("private key in {path} must be PKCS#8 or PKCS#1")]
    UnsupportedKey { path: PathBuf },
    #[error("failed to start HTTP server: {source}")]
    Server {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("endpoint {endpoint} is already registered")]
    AlreadyRegistered { endpoint: String },
    #[error("no endpoint registered before start")]
    NotRegistered,
    #[error("transport is closed")]
    Closed,
    #[error("request was dropped without a response")]
    NoResponse,
    #[error("transport thread panicked")]
    ThreadPanic,
}

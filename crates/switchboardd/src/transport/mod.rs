//! Transports that turn network traffic into request/response exchanges.
//!
//! A [`Transport`] binds one endpoint path to an [`Inbound`] stream of
//! [`Exchange`] values and then starts accepting work. Each exchange pairs a
//! [`Request`](crate::dispatch::Request) with a one-shot [`ResponseSink`];
//! consuming the sink on send means a request can receive at most one
//! response. Stopping a transport through its [`TransportHandle`] releases
//! the transport's producer and closes the inbound stream, which is the
//! pump's only cancellation signal.

mod errors;
mod exchange;
mod handle;
mod http;
mod memory;

use std::sync::Arc;

use switchboard_config::Config;

pub use self::errors::TransportError;
pub use self::exchange::{Exchange, Inbound, ResponseReceiver, ResponseSink, Undeliverable};
pub use self::handle::TransportHandle;
pub use self::http::HttpTransport;
pub use self::memory::{MemoryTransport, Submitter};

pub(crate) use self::exchange::{ExchangeSender, ProducerSlot, exchange_channel};

pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// A source of request exchanges.
pub trait Transport: Send {
    /// Binds `endpoint` and returns the stream its requests arrive on.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AlreadyRegistered`] when an endpoint has
    /// already been bound on this transport.
    fn register(&mut self, endpoint: &str) -> Result<Inbound, TransportError>;

    /// Begins accepting requests in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint was registered or the server
    /// cannot be started.
    fn start(self: Box<Self>) -> Result<TransportHandle, TransportError>;
}

/// Builds the transport selected by configuration.
pub trait TransportFactory {
    /// Creates a transport ready for [`Transport::register`].
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot be created, for example
    /// when the port is taken or TLS material is unusable.
    fn create(&self, config: &Arc<Config>) -> Result<Box<dyn Transport>, TransportError>;
}

impl<T> TransportFactory for Arc<T>
where
    T: TransportFactory + ?Sized,
{
    fn create(&self, config: &Arc<Config>) -> Result<Box<dyn Transport>, TransportError> {
        (**self).create(config)
    }
}

/// Factory for the production HTTP(S) transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransportFactory;

impl TransportFactory for HttpTransportFactory {
    fn create(&self, config: &Arc<Config>) -> Result<Box<dyn Transport>, TransportError> {
        Ok(Box::new(HttpTransport::bind(Arc::clone(config))?))
    }
}

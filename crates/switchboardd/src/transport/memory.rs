//! In-process transport for embedding and tests.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use super::{
    ExchangeSender, Inbound, ProducerSlot, ResponseReceiver, Transport, TransportError,
    TransportHandle, exchange_channel,
};
use crate::dispatch::{Request, Response};

/// Transport whose requests are injected through [`Submitter`]s.
///
/// The exchange stream exists from construction, so requests may be queued
/// (up to `capacity`) before the pump starts. The stream closes when the
/// handle is shut down and every submitter has been dropped.
#[derive(Debug)]
pub struct MemoryTransport {
    sender: ExchangeSender,
    inbound: Option<Inbound>,
    endpoint: Option<String>,
}

impl MemoryTransport {
    /// Creates a transport buffering at most `capacity` unprocessed requests.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, inbound) = exchange_channel(capacity);
        Self {
            sender,
            inbound: Some(inbound),
            endpoint: None,
        }
    }

    /// Returns a handle for injecting requests.
    #[must_use]
    pub fn submitter(&self) -> Submitter {
        Submitter {
            sender: self.sender.clone(),
        }
    }
}

impl Transport for MemoryTransport {
    fn register(&mut self, endpoint: &str) -> Result<Inbound, TransportError> {
        if let Some(existing) = &self.endpoint {
            return Err(TransportError::AlreadyRegistered {
                endpoint: existing.clone(),
            });
        }
        let inbound = self.inbound.take().ok_or(TransportError::Closed)?;
        self.endpoint = Some(endpoint.to_owned());
        Ok(inbound)
    }

    fn start(self: Box<Self>) -> Result<TransportHandle, TransportError> {
        if self.endpoint.is_none() {
            return Err(TransportError::NotRegistered);
        }
        Ok(TransportHandle::new(
            Arc::new(AtomicBool::new(false)),
            ProducerSlot::new(self.sender),
            None,
            None,
        ))
    }
}

/// Injects requests into a [`MemoryTransport`].
#[derive(Debug, Clone)]
pub struct Submitter {
    sender: ExchangeSender,
}

impl Submitter {
    /// Queues a request and returns the receiver for its response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] once the inbound stream is gone.
    pub fn submit(&self, request: Request) -> Result<ResponseReceiver, TransportError> {
        self.sender.submit(request)
    }

    /// Queues a request and blocks for its response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] if the request cannot be queued and
    /// [`TransportError::NoResponse`] if it is dropped unanswered.
    pub fn call(&self, request: Request) -> Result<Response, TransportError> {
        self.submit(request)?.wait().ok_or(TransportError::NoResponse)
    }
}

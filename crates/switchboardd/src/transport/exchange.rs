//! Request/response pairing between transports and pumps.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;

use super::TransportError;
use crate::dispatch::{Request, Response};

/// One inbound request and the sink its response must be written to.
#[derive(Debug)]
pub struct Exchange {
    request: Request,
    sink: ResponseSink,
}

impl Exchange {
    /// Pairs a request with its sink.
    pub fn new(request: Request, sink: ResponseSink) -> Self {
        Self { request, sink }
    }

    /// Returns the request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Splits the exchange so the sink can be consumed.
    pub fn into_parts(self) -> (Request, ResponseSink) {
        (self.request, self.sink)
    }
}

/// The requester stopped waiting before the response was sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("response receiver dropped before delivery")]
pub struct Undeliverable;

/// Write side of a single-response channel.
#[derive(Debug)]
pub struct ResponseSink {
    sender: SyncSender<Response>,
}

impl ResponseSink {
    /// Creates a connected sink and receiver.
    #[must_use]
    pub fn pair() -> (Self, ResponseReceiver) {
        let (sender, receiver) = mpsc::sync_channel(1);
        (Self { sender }, ResponseReceiver { receiver })
    }

    /// Delivers the response, consuming the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Undeliverable`] when the receiver has been dropped.
    pub fn send(self, response: Response) -> Result<(), Undeliverable> {
        match self.sender.try_send(response) {
            Ok(()) => Ok(()),
            Err(TrySendError::Disconnected(_) | TrySendError::Full(_)) => Err(Undeliverable),
        }
    }
}

/// Read side of a single-response channel.
#[derive(Debug)]
pub struct ResponseReceiver {
    receiver: Receiver<Response>,
}

impl ResponseReceiver {
    /// Blocks until the response arrives.
    ///
    /// Returns `None` when the sink was dropped without a response, which
    /// only happens if the exchange was discarded unprocessed.
    pub fn wait(self) -> Option<Response> {
        self.receiver.recv().ok()
    }

    /// Like [`Self::wait`] but gives up after `timeout`.
    pub fn wait_timeout(self, timeout: Duration) -> Option<Response> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

/// Producer side of an exchange stream.
#[derive(Debug, Clone)]
pub(crate) struct ExchangeSender {
    sender: SyncSender<Exchange>,
}

impl ExchangeSender {
    /// Queues `request`, blocking while the stream is at capacity.
    pub(crate) fn submit(&self, request: Request) -> Result<ResponseReceiver, TransportError> {
        let (sink, receiver) = ResponseSink::pair();
        self.sender
            .send(Exchange::new(request, sink))
            .map_err(|_| TransportError::Closed)?;
        Ok(receiver)
    }
}

/// The transport's own producer, released on shutdown.
///
/// Connection threads check a sender out only for the moment they submit, so
/// emptying the slot closes the stream even while clients are still sending.
#[derive(Debug, Clone)]
pub(crate) struct ProducerSlot {
    sender: Arc<Mutex<Option<ExchangeSender>>>,
}

impl ProducerSlot {
    pub(crate) fn new(sender: ExchangeSender) -> Self {
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    /// Clones the producer, or `None` once the slot has been released.
    pub(crate) fn checkout(&self) -> Option<ExchangeSender> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops the retained producer. Idempotent.
    pub(crate) fn release(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Submits through a checked-out producer and drops it before waiting.
    pub(crate) fn submit(&self, request: Request) -> Result<ResponseReceiver, TransportError> {
        let sender = self.checkout().ok_or(TransportError::Closed)?;
        sender.submit(request)
    }
}

/// Consumer side of an exchange stream, shareable between pumps.
///
/// The stream closes once every producer has been dropped; after that
/// [`Inbound::next`] drains what is queued and then returns `None`.
#[derive(Debug)]
pub struct Inbound {
    receiver: Mutex<Receiver<Exchange>>,
}

impl Inbound {
    /// Blocks for the next exchange, or `None` once the stream is closed and
    /// empty.
    pub fn next(&self) -> Option<Exchange> {
        let receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        receiver.recv().ok()
    }
}

/// Creates a bounded exchange stream holding at most `capacity` queued
/// exchanges.
pub(crate) fn exchange_channel(capacity: usize) -> (ExchangeSender, Inbound) {
    let (sender, receiver) = mpsc::sync_channel(capacity);
    (
        ExchangeSender { sender },
        Inbound {
            receiver: Mutex::new(receiver),
        },
    )
}

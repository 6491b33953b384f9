//! Handle for a started transport.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use tracing::debug;

use super::{ProducerSlot, TRANSPORT_TARGET, TransportError};

/// Controls a running transport.
///
/// The handle is `Sync` so a shutdown watcher can stop the transport while
/// pumps are still draining on another thread.
#[derive(Debug)]
pub struct TransportHandle {
    shutdown: Arc<AtomicBool>,
    producer: ProducerSlot,
    worker: Mutex<Option<JoinHandle<()>>>,
    local_addr: Option<SocketAddr>,
}

impl TransportHandle {
    pub(crate) fn new(
        shutdown: Arc<AtomicBool>,
        producer: ProducerSlot,
        worker: Option<JoinHandle<()>>,
        local_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            shutdown,
            producer,
            worker: Mutex::new(worker),
            local_addr,
        }
    }

    /// Stops accepting new requests and releases the transport's producer.
    ///
    /// Requests that finish arriving after this point are refused, so the
    /// inbound stream closes once already-submitted exchanges are queued.
    pub fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            debug!(target: TRANSPORT_TARGET, "transport shutdown requested");
        }
        self.producer.release();
    }

    /// Returns `true` once [`Self::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Address the transport accepts connections on, if it has one.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Waits for the background serving thread to finish.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ThreadPanic`] if the loop panicked.
    pub fn join(&self) -> Result<(), TransportError> {
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match worker {
            Some(handle) => handle.join().map_err(|_| TransportError::ThreadPanic),
            None => Ok(()),
        }
    }
}

impl Drop for TransportHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

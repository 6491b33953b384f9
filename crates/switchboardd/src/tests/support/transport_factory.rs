//! Transport factory double that counts creations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use switchboard_config::Config;

use crate::transport::{MemoryTransport, Submitter, Transport, TransportError, TransportFactory};

/// Hands out one prepared [`MemoryTransport`], or fails on demand.
pub struct TestTransportFactory {
    transport: Mutex<Option<MemoryTransport>>,
    creations: AtomicUsize,
}

impl TestTransportFactory {
    /// Factory yielding an in-memory transport plus its submitter.
    pub fn memory(capacity: usize) -> (Arc<Self>, Submitter) {
        let transport = MemoryTransport::new(capacity);
        let submitter = transport.submitter();
        let factory = Arc::new(Self {
            transport: Mutex::new(Some(transport)),
            creations: AtomicUsize::new(0),
        });
        (factory, submitter)
    }

    /// Factory whose every creation fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            transport: Mutex::new(None),
            creations: AtomicUsize::new(0),
        })
    }

    /// Number of times [`TransportFactory::create`] was called.
    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }
}

impl TransportFactory for TestTransportFactory {
    fn create(&self, _config: &Arc<Config>) -> Result<Box<dyn Transport>, TransportError> {
        self.creations.fetch_add(1, Ordering::SeqCst);
        self.transport
            .lock()
            .expect("factory mutex poisoned")
            .take()
            .map(|transport| Box::new(transport) as Box<dyn Transport>)
            .ok_or(TransportError::TlsMaterialMissing)
    }
}

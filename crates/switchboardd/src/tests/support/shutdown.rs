//! Shutdown signal fired explicitly by tests.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use crate::lifecycle::{ShutdownError, ShutdownSignal};

/// Signal that fires when its [`ShutdownTrigger`] is pulled or dropped.
pub struct TriggeredShutdown {
    receiver: Mutex<Receiver<()>>,
}

/// Fires the paired [`TriggeredShutdown`].
pub struct ShutdownTrigger {
    sender: Sender<()>,
}

impl TriggeredShutdown {
    pub fn new() -> (Self, ShutdownTrigger) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                receiver: Mutex::new(receiver),
            },
            ShutdownTrigger { sender },
        )
    }
}

impl ShutdownTrigger {
    pub fn fire(self) {
        let _ = self.sender.send(());
    }
}

impl ShutdownSignal for TriggeredShutdown {
    fn wait(&self) -> Result<(), ShutdownError> {
        let receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = receiver.recv();
        Ok(())
    }
}

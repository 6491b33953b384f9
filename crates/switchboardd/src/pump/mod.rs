//! Service pump: drains the inbound stream through the dispatcher.
//!
//! A single [`ServicePump`] handles one exchange at a time: take it off the
//! stream, dispatch, write the response to that exchange's own sink, repeat.
//! The loop ends when the stream is closed and empty. [`run_pumps`] runs
//! several pumps over the same stream for throughput; the dispatcher only
//! reads shared configuration, so pumps never contend on handler state.

mod state;

use std::ops::AddAssign;
use std::thread;

use tracing::{debug, error, warn};

use crate::dispatch::Dispatcher;
use crate::transport::Inbound;

pub use self::state::ServiceState;

const PUMP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::pump");

/// Counters describing a pump's work.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpReport {
    /// Exchanges taken off the stream and dispatched.
    pub processed: usize,
    /// Responses whose requester had stopped waiting.
    pub undeliverable: usize,
}

impl AddAssign for PumpReport {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.undeliverable += other.undeliverable;
    }
}

/// One sequential consumer of an inbound stream.
#[derive(Debug, Clone, Copy)]
pub struct ServicePump<'a> {
    id: usize,
    dispatcher: &'a Dispatcher,
}

impl<'a> ServicePump<'a> {
    /// Creates pump `id` over `dispatcher`.
    pub fn new(id: usize, dispatcher: &'a Dispatcher) -> Self {
        Self { id, dispatcher }
    }

    /// Processes exchanges until `inbound` is closed and drained.
    pub fn run(&self, inbound: &Inbound) -> PumpReport {
        debug!(target: PUMP_TARGET, pump = self.id, "pump serving");
        let mut report = PumpReport::default();
        while let Some(exchange) = inbound.next() {
            let (request, sink) = exchange.into_parts();
            let response = self.dispatcher.dispatch(&request);
            report.processed += 1;
            if let Err(error) = sink.send(response) {
                report.undeliverable += 1;
                warn!(
                    target: PUMP_TARGET,
                    pump = self.id,
                    action = request.action().unwrap_or_default(),
                    %error,
                    "response dropped"
                );
            }
        }
        debug!(
            target: PUMP_TARGET,
            pump = self.id,
            processed = report.processed,
            "inbound stream closed"
        );
        report
    }
}

/// Runs `workers` pumps over `inbound` and sums their reports.
///
/// A single worker runs on the calling thread; more are spawned as scoped
/// threads. Zero is treated as one.
pub fn run_pumps(workers: usize, inbound: &Inbound, dispatcher: &Dispatcher) -> PumpReport {
    if workers <= 1 {
        return ServicePump::new(0, dispatcher).run(inbound);
    }
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|id| scope.spawn(move || ServicePump::new(id, dispatcher).run(inbound)))
            .collect();
        let mut total = PumpReport::default();
        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => total += report,
                Err(_) => error!(target: PUMP_TARGET, pump = id, "pump thread panicked"),
            }
        }
        total
    })
}

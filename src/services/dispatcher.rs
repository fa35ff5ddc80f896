//! Background operation dispatcher
//!
//! Runs data service calls on worker threads and hands their completions
//! back to the UI thread, which drains them on every tick.

use super::service::SubmissionService;
use crate::model::{Completion, Operation, Outcome};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// Dispatcher for data service calls
pub struct Dispatcher {
    service: Arc<dyn SubmissionService>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    /// Operations dispatched but not yet drained
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn SubmissionService>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start an operation on a worker thread
    pub fn dispatch(&mut self, operation: Operation) {
        info!(%operation, "dispatching");
        let service = Arc::clone(&self.service);
        let tx = self.sender.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let completion = Self::run(service.as_ref(), operation);
            // The UI may already be gone; nothing left to report to
            let _ = tx.send(completion);
        });
    }

    /// Drain every completion that has arrived since the last poll
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(completion) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    debug!(ticket = completion.ticket, "operation settled");
                    completions.push(completion);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        completions
    }

    fn run(service: &dyn SubmissionService, operation: Operation) -> Completion {
        let ticket = operation.ticket();
        let outcome = match operation {
            Operation::Fetch { .. } => Outcome::Fetched(service.fetch()),
            Operation::Update { id, patch, .. } => Outcome::Updated(service.update(&id, &patch)),
            Operation::Delete { id, .. } => Outcome::Deleted(service.delete(&id)),
        };
        Completion::new(ticket, outcome)
    }
}

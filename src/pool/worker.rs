//! # Worker Pool
//!
//! A fixed number of Tokio tasks ("workers", one per machine outlet) share a single bounded
//! job queue. Each worker takes the next [`Job`], runs its reservation to completion and
//! answers on the job's response channel.
//!
//! **Concurrency Model**:
//! A worker never awaits between the first ledger mutation of a job and its answer, so a
//! reservation is never suspended half-way. The queue lock is only held while waiting for
//! the next job, never while reserving.
//!
//! Beverages beyond the worker count wait in the queue; once the queue is full, callers
//! wait in [`PoolClient::dispatch`](super::PoolClient::dispatch). This bounds contention
//! on the ledger, not correctness.

use super::client::PoolClient;
use super::error::PoolError;
use super::message::Job;
use crate::ledger::ResourceLedger;
use crate::model::{Beverage, Outcome, Report};
use crate::reservation::ReservationCoordinator;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Default capacity of the job queue.
pub const JOB_BUFFER: usize = 32;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<Job>>>;

/// What a worker does with each beverage it takes off the queue.
pub(crate) type Handler = Arc<dyn Fn(&Beverage) -> Outcome + Send + Sync>;

/// Handles of the running workers.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `workers` tasks on the current Tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `workers` - Number of beverages prepared in parallel. Callers validate it is > 0.
    /// * `buffer` - Capacity of the job queue.
    /// * `ledger` - The inventory every worker reserves against.
    pub fn spawn(
        workers: usize,
        buffer: usize,
        ledger: Arc<ResourceLedger>,
    ) -> (Self, PoolClient) {
        let handler: Handler = Arc::new(move |beverage: &Beverage| {
            ReservationCoordinator::new(&ledger).reserve(beverage)
        });
        Self::spawn_with(workers, buffer, handler)
    }

    /// Spawns workers that evaluate every beverage with `handler`.
    pub(crate) fn spawn_with(
        workers: usize,
        buffer: usize,
        handler: Handler,
    ) -> (Self, PoolClient) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));

        let handles = (0..workers)
            .map(|worker| {
                let receiver = Arc::clone(&receiver);
                let handler = Arc::clone(&handler);
                tokio::spawn(run_worker(worker, receiver, handler))
            })
            .collect();

        info!(workers, buffer, "Worker pool started");
        (Self { handles }, PoolClient::new(sender))
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to drain the queue and exit.
    ///
    /// Workers exit once every [`PoolClient`] clone has been dropped. Returns an error if
    /// any worker panicked.
    pub async fn shutdown(self) -> Result<(), PoolError> {
        let mut failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Worker task failed");
                if failure.is_none() {
                    failure = Some(PoolError::WorkerPanicked(e.to_string()));
                }
            }
        }
        match failure {
            Some(e) => Err(e),
            None => {
                info!("Worker pool stopped");
                Ok(())
            }
        }
    }
}

async fn run_worker(worker: usize, receiver: SharedReceiver, handler: Handler) {
    debug!(worker, "Worker started");
    let mut served = 0usize;

    loop {
        let job = receiver.lock().await.recv().await;
        let Some(Job {
            beverage,
            respond_to,
        }) = job
        else {
            break;
        };

        let outcome = handler(&beverage);
        let report = Report::new(beverage.name, outcome);
        let prepared = report.outcome.is_prepared();
        info!(worker, beverage = %report.beverage, prepared, "Served");
        served += 1;
        if let Err(Ok(report)) = respond_to.send(Ok(report)) {
            // The ledger already reflects this beverage; only the answer is lost.
            warn!(worker, beverage = %report.beverage, prepared, "Caller gone, report dropped");
        }
    }

    debug!(worker, served, "Worker stopped");
}

//! # Pool Errors
//!
//! Failures of the worker-pool plumbing itself. Running out of an ingredient never shows
//! up here; it is an [`Outcome`](crate::model::Outcome).

/// Errors that can occur while handing a beverage to a worker or waiting for its answer.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PoolError {
    #[error("Worker pool closed")]
    PoolClosed,
    #[error("Worker dropped response channel")]
    WorkerDropped,
    #[error("Worker task failed: {0}")]
    WorkerPanicked(String),
}

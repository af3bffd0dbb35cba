//! Bounded worker pool that evaluates beverages against the shared ledger.
//!
//! # Main Components
//!
//! - [`WorkerPool`] - The running workers (one per outlet)
//! - [`PoolClient`] - Cloneable handle that enqueues beverages
//! - [`Dispatcher`] - The seam the batch processor is written against
//! - [`PoolError`] - Plumbing failures
//!
//! # Testing
//!
//! See [`mock`] for driving a [`PoolClient`] without spawning workers.

pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod worker;

pub use client::{Dispatcher, Pending, PoolClient};
pub use error::PoolError;
pub use message::{Job, Response};
pub use worker::{WorkerPool, JOB_BUFFER};

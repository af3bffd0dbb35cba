//! # Machine Errors
//!
//! The top-level error returned by [`BeverageMachine`](crate::lifecycle::BeverageMachine)
//! and the [`BatchProcessor`](crate::batch::BatchProcessor).

use crate::ledger::InitializationError;
use crate::pool::PoolError;
use thiserror::Error;

/// Errors surfaced to callers of the machine.
///
/// A beverage that cannot be prepared is not an error; see
/// [`Outcome`](crate::model::Outcome).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    /// The machine was used before `init`.
    #[error("Machine not initialized")]
    NotReady,

    /// The startup configuration was rejected.
    #[error("Initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    /// Two beverages in one batch share a name, so their reports could not be told apart.
    #[error("Duplicate beverage in batch: {0}")]
    DuplicateBeverage(String),

    /// The worker pool failed while a batch was in flight.
    #[error("Batch aborted: {0}")]
    Task(#[from] PoolError),
}

//! # Job Messages
//!
//! The message type sent from a [`PoolClient`](super::PoolClient) to the workers.

use crate::model::{Beverage, Report};
use super::error::PoolError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel a worker answers on.
pub type Response<T> = oneshot::Sender<Result<T, PoolError>>;

/// One beverage waiting for a worker.
#[derive(Debug)]
pub struct Job {
    pub beverage: Beverage,
    pub respond_to: Response<Report>,
}

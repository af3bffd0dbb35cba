//! # Pool Client
//!
//! The sending half of the worker pool, plus the [`Dispatcher`] trait the batch processor
//! is written against.

use super::error::PoolError;
use super::message::Job;
use crate::model::{Beverage, Report};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Anything that can accept beverages for evaluation and report back.
///
/// [`PoolClient`] is the production implementation. The batch processor only talks to
/// this trait, so its fan-out can be exercised against a hand-written dispatcher.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Enqueues a beverage and returns a handle to its pending report.
    ///
    /// Must return as soon as the beverage is accepted, without waiting for it to be
    /// evaluated; batches rely on this to have all of their beverages in flight at once.
    async fn submit(&self, beverage: Beverage) -> Result<Pending, PoolError>;

    /// Hands one beverage over for evaluation and waits for its report.
    async fn dispatch(&self, beverage: Beverage) -> Result<Report, PoolError> {
        self.submit(beverage).await?.collect().await
    }
}

/// A report that has been requested but not yet collected.
#[derive(Debug)]
pub struct Pending {
    response: oneshot::Receiver<Result<Report, PoolError>>,
}

impl Pending {
    /// Wraps the receiving end of a job's response channel.
    pub fn new(response: oneshot::Receiver<Result<Report, PoolError>>) -> Self {
        Self { response }
    }

    /// Waits for the worker's answer.
    pub async fn collect(self) -> Result<Report, PoolError> {
        self.response.await.map_err(|_| PoolError::WorkerDropped)?
    }
}

/// A cloneable handle for sending beverages to the worker pool.
#[derive(Clone, Debug)]
pub struct PoolClient {
    sender: mpsc::Sender<Job>,
}

impl PoolClient {
    pub fn new(sender: mpsc::Sender<Job>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Dispatcher for PoolClient {
    #[instrument(skip_all, fields(beverage = %beverage.name))]
    async fn dispatch(&self, beverage: Beverage) -> Result<Report, PoolError> {
        self.submit(beverage).await?.collect().await
    }

    async fn submit(&self, beverage: Beverage) -> Result<Pending, PoolError> {
        debug!(beverage = %beverage.name, "Enqueueing");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Job {
                beverage,
                respond_to,
            })
            .await
            .map_err(|_| PoolError::PoolClosed)?;
        Ok(Pending::new(response))
    }
}

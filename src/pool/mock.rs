//! # Mock Pool
//!
//! Lets a test play the worker side of the pool: every beverage a [`PoolClient`] sends
//! arrives on a plain receiver, and the test decides how to answer it (or whether to
//! answer at all).
//!
//! | | Mock pool | Real workers |
//! |---|---|---|
//! | **Determinism** | Test controls every answer | Subject to scheduler |
//! | **Error injection** | Drop the responder | Requires a panicking worker |
//!
//! ```rust
//! use beverage_machine::model::{Beverage, Outcome, Report};
//! use beverage_machine::pool::mock::{create_mock_pool, expect_job};
//! use beverage_machine::pool::Dispatcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_pool(4);
//!
//!     let task = tokio::spawn(async move { client.dispatch(Beverage::new("tea")).await });
//!
//!     let (beverage, responder) = expect_job(&mut receiver).await.unwrap();
//!     responder.send(Ok(Report::new(beverage.name, Outcome::Prepared))).unwrap();
//!
//!     assert_eq!(task.await.unwrap().unwrap().to_string(), "tea is prepared");
//! }
//! ```

use super::client::PoolClient;
use super::message::{Job, Response};
use crate::model::{Beverage, Report};
use tokio::sync::mpsc;

/// Creates a client whose jobs land on the returned receiver instead of real workers.
pub fn create_mock_pool(buffer_size: usize) -> (PoolClient, mpsc::Receiver<Job>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (PoolClient::new(sender), receiver)
}

/// Waits for the next job and splits it into the beverage and its responder.
///
/// Returns `None` once every client has been dropped.
pub async fn expect_job(
    receiver: &mut mpsc::Receiver<Job>,
) -> Option<(Beverage, Response<Report>)> {
    receiver
        .recv()
        .await
        .map(|Job { beverage, respond_to }| (beverage, respond_to))
}

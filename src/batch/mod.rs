//! # Batch Processor
//!
//! Fans a batch of beverages out over a [`Dispatcher`] and gathers one [`Report`] per
//! beverage.
//!
//! Every beverage is enqueued before any result is awaited, so the whole batch competes
//! for the ledger at once (bounded by the pool's worker count). The call then waits for
//! every report. If any of them fails for a reason other than a short ingredient, the
//! whole batch fails and no partial result is returned. Collection of the remaining reports
//! stops there; jobs already handed to workers still run to completion.
//!
//! Callers must not rely on the order of the returned reports. Reports are matched to
//! beverages by name, so a batch that names the same beverage twice is rejected before
//! anything is dispatched.

use crate::error::MachineError;
use crate::model::{Beverage, Report};
use crate::pool::Dispatcher;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Evaluates batches of beverages concurrently.
#[derive(Clone)]
pub struct BatchProcessor {
    dispatcher: Arc<dyn Dispatcher>,
}

impl BatchProcessor {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Processes every beverage and returns one report each.
    #[instrument(skip_all, fields(size = tracing::field::Empty))]
    pub async fn process_batch<I>(&self, beverages: I) -> Result<Vec<Report>, MachineError>
    where
        I: IntoIterator<Item = Beverage>,
    {
        let beverages: Vec<Beverage> = beverages.into_iter().collect();
        tracing::Span::current().record("size", beverages.len());

        let mut names = HashSet::with_capacity(beverages.len());
        if let Some(duplicate) = beverages.iter().find(|b| !names.insert(b.name.as_str())) {
            error!(beverage = %duplicate.name, "Duplicate beverage in batch");
            return Err(MachineError::DuplicateBeverage(duplicate.name.clone()));
        }

        let mut pending = Vec::with_capacity(beverages.len());
        for beverage in beverages {
            let name = beverage.name.clone();
            let ticket = self.dispatcher.submit(beverage).await.map_err(|e| {
                error!(beverage = %name, error = %e, "Dispatch failed");
                MachineError::from(e)
            })?;
            pending.push((name, ticket));
        }

        let mut reports = Vec::with_capacity(pending.len());
        for (name, ticket) in pending {
            let report = ticket.collect().await.map_err(|e| {
                error!(beverage = %name, error = %e, "Beverage failed unexpectedly");
                MachineError::from(e)
            })?;
            reports.push(report);
        }

        let prepared = reports.iter().filter(|r| r.outcome.is_prepared()).count();
        info!(total = reports.len(), prepared, "Batch complete");
        Ok(reports)
    }

    /// Like [`process_batch`](Self::process_batch), rendered as output lines.
    pub async fn process_batch_lines<I>(&self, beverages: I) -> Result<Vec<String>, MachineError>
    where
        I: IntoIterator<Item = Beverage>,
    {
        let reports = self.process_batch(beverages).await?;
        Ok(reports.iter().map(Report::to_string).collect())
    }
}

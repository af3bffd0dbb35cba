use super::config::MachineConfig;
use crate::batch::BatchProcessor;
use crate::error::MachineError;
use crate::ledger::{InitializationError, ResourceLedger};
use crate::model::{Beverage, Report};
use crate::pool::{WorkerPool, JOB_BUFFER};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, instrument, warn};

/// The runtime orchestrator for one beverage machine.
///
/// `BeverageMachine` is responsible for:
/// - **Lifecycle Management**: Starting the worker pool on `init`, stopping it on `shutdown`
/// - **Dependency Wiring**: Handing the one shared [`ResourceLedger`] to every worker
/// - **Inspection**: Quantities, exhausted ingredients and refills
///
/// The machine is created empty and configured exactly once. Every other operation fails
/// with [`MachineError::NotReady`] until then.
///
/// # Example
///
/// ```rust
/// use beverage_machine::lifecycle::{BeverageMachine, MachineConfig};
/// use beverage_machine::model::Beverage;
/// use std::collections::BTreeMap;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let machine = BeverageMachine::new();
///     let stock = BTreeMap::from([("water".to_string(), 500), ("sugar".to_string(), 100)]);
///     machine.init(MachineConfig::new(2, stock))?;
///
///     let tea = Beverage::new("tea")
///         .with_ingredient("water", 200)
///         .with_ingredient("sugar", 100);
///     let lines = machine.process_lines(vec![tea]).await?;
///     assert_eq!(lines, vec!["tea is prepared".to_string()]);
///
///     machine.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct BeverageMachine {
    state: OnceLock<Running>,
}

/// Everything that exists only after `init`.
struct Running {
    ledger: Arc<ResourceLedger>,
    processor: BatchProcessor,
    pool: WorkerPool,
}

impl Default for BeverageMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl BeverageMachine {
    pub fn new() -> Self {
        Self {
            state: OnceLock::new(),
        }
    }

    /// Builds the ledger and starts one worker per outlet.
    ///
    /// Must be called from within a Tokio runtime. Fails if the configuration is invalid
    /// or the machine is already running.
    #[instrument(skip_all, fields(outlets = config.outlets.count_n))]
    pub fn init(&self, config: MachineConfig) -> Result<(), MachineError> {
        if self.state.get().is_some() {
            warn!("init called twice");
            return Err(InitializationError::AlreadyInitialized.into());
        }
        let outlets = config.outlets.count_n;
        if outlets == 0 {
            return Err(InitializationError::InvalidOutletCount(outlets).into());
        }

        let ledger = Arc::new(ResourceLedger::new(config.total_items_quantity)?);
        let (pool, client) = WorkerPool::spawn(outlets, JOB_BUFFER, Arc::clone(&ledger));
        let running = Running {
            ledger,
            processor: BatchProcessor::new(Arc::new(client)),
            pool,
        };

        // A concurrent init may have won the race; our pool stops once `running` drops.
        self.state
            .set(running)
            .map_err(|_| InitializationError::AlreadyInitialized)?;
        info!(outlets, "Machine ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.state.get().is_some()
    }

    fn running(&self) -> Result<&Running, MachineError> {
        self.state.get().ok_or(MachineError::NotReady)
    }

    /// The shared ledger, for callers that want to inspect it directly.
    pub fn ledger(&self) -> Result<Arc<ResourceLedger>, MachineError> {
        Ok(Arc::clone(&self.running()?.ledger))
    }

    /// Prepares a batch of beverages concurrently.
    pub async fn process<I>(&self, beverages: I) -> Result<Vec<Report>, MachineError>
    where
        I: IntoIterator<Item = Beverage>,
    {
        self.running()?.processor.process_batch(beverages).await
    }

    /// Prepares a batch and renders each outcome as an output line.
    pub async fn process_lines<I>(&self, beverages: I) -> Result<Vec<String>, MachineError>
    where
        I: IntoIterator<Item = Beverage>,
    {
        self.running()?.processor.process_batch_lines(beverages).await
    }

    /// Current quantity of every ingredient.
    pub fn item_quantities(&self) -> Result<HashMap<String, u64>, MachineError> {
        Ok(self.running()?.ledger.snapshot())
    }

    /// Ingredients that have run out.
    pub fn low_running_items(&self) -> Result<BTreeSet<String>, MachineError> {
        Ok(self.running()?.ledger.zero_quantity_resources())
    }

    /// Adds `amount` units of an ingredient and returns the new quantity.
    ///
    /// Refilling an ingredient the machine does not track changes nothing and returns `0`.
    #[instrument(skip(self))]
    pub fn refill(&self, ingredient: &str, amount: u32) -> Result<u64, MachineError> {
        let ledger = &self.running()?.ledger;
        if !ledger.contains(ingredient) {
            warn!("Refill of untracked ingredient ignored");
            return Ok(0);
        }
        let quantity = ledger.increment(ingredient, amount);
        info!(quantity, "Refilled");
        Ok(quantity)
    }

    /// Gracefully shuts down the machine.
    ///
    /// Drops the pool client, which closes the job queue, then waits for every worker.
    /// Returns an error if any worker panicked. Shutting down a machine that was never
    /// initialized is a no-op.
    pub async fn shutdown(self) -> Result<(), MachineError> {
        let Some(Running {
            ledger,
            processor,
            pool,
        }) = self.state.into_inner()
        else {
            return Ok(());
        };

        info!("Shutting down machine...");
        drop(processor);
        if let Err(e) = pool.shutdown().await {
            error!(error = %e, "Worker pool did not stop cleanly");
            return Err(MachineError::Task(e));
        }

        let remaining: u64 = ledger.snapshot().values().sum();
        info!(remaining, "Machine shutdown complete.");
        Ok(())
    }
}

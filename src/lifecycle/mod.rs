//! # Machine Lifecycle
//!
//! Starting, wiring and shutting down a beverage machine.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`MachineConfig`] DTOs for the startup input
//! 2. **Wiring** - [`BeverageMachine::init`] builds the ledger and hands it to every worker
//! 3. **Graceful Shutdown** - [`BeverageMachine::shutdown`] closes the job queue and joins
//!    the workers
//! 4. **Observability Setup** - [`setup_tracing`]
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the pool client** - Closes the sender side of the job queue
//! 2. **Workers detect closure** - `recv()` returns `None` once the queue is drained
//! 3. **Await completion** - Wait for every worker task; a panic becomes an error

pub mod config;
pub mod machine;
pub mod tracing;

pub use config::*;
pub use machine::*;
pub use self::tracing::setup_tracing;

//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The compact format hides the
//! module prefix (`with_target(false)`) and shows spans inline.
//!
//! ```bash
//! # Batch summaries, refills, lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every decrement, shortfall and rollback
//! RUST_LOG=debug cargo run
//!
//! # Only the reservation logic
//! RUST_LOG=beverage_machine::reservation=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: ledger initialization, worker pool start/stop, machine shutdown
//! - **Workers**: one `Served` event per beverage with the worker index
//! - **Reservations**: decrements, shortfalls and rollbacks inside a `reserve{beverage=..}` span
//! - **Batches**: size and prepared count inside a `process_batch` span
//! - **Errors**: unexpected pool failures are logged before they are returned
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO init: Ledger initialized ingredients=5
//! INFO init: Worker pool started workers=3 buffer=32
//! DEBUG reserve: Decremented beverage=hot_tea ingredient="ginger_syrup" amount=10 remaining=90
//! DEBUG reserve: Insufficient beverage=black_tea ingredient="hot_water" amount=300 available=100
//! DEBUG reserve: Insufficient, reservations returned ingredient="hot_water" rolled_back=3
//! INFO Served worker=1 beverage=black_tea prepared=false
//! INFO process_batch: Batch complete size=4 total=4 prepared=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Beverage Machine
//!
//! > **A concurrent inventory-reservation engine.**
//!
//! A machine holds a shared pool of ingredients and serves several outlets at once. Every
//! beverage in a batch tries to reserve all of its ingredients; if one of them is short, the
//! beverage gives back whatever it already took and reports the shortfall. Other beverages
//! running at the same time always see a consistent pool.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### No global lock
//!
//! Every ingredient has its own atomic counter. Beverages that share no ingredient never
//! wait on each other; beverages that do are serialized on that one counter only.
//!
//! ### Compensation instead of transactions
//!
//! A beverage that fails half-way adds back exactly the amounts it removed. Additions and
//! subtractions commute, so interleaving with other beverages can make availability dip
//! for a moment but can never corrupt the totals.
//!
//! ### Explicit wiring
//!
//! There is no global machine. A [`BeverageMachine`](lifecycle::BeverageMachine) is
//! constructed, initialized once, and passed to whoever needs it.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Inventory ([`ledger`])
//! - **Role**: Per-ingredient atomic counters with non-negative decrement and increment.
//! - **Key items**: [`ResourceLedger`](ledger::ResourceLedger).
//!
//! ### 2. The Reservation ([`reservation`])
//! - **Role**: Reserves one beverage, rolls back on partial failure.
//! - **Key items**: [`ReservationCoordinator`](reservation::ReservationCoordinator).
//!
//! ### 3. The Workers ([`pool`], [`batch`])
//! - **Role**: A bounded pool of Tokio tasks (one per outlet) and the batch fan-out on top.
//! - **Key items**: [`WorkerPool`](pool::WorkerPool), [`BatchProcessor`](batch::BatchProcessor).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, wiring, inspection, refill and graceful shutdown.
//! - **Key items**: [`BeverageMachine`](lifecycle::BeverageMachine),
//!   [`MachineConfig`](lifecycle::MachineConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod batch;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod pool;
pub mod reservation;

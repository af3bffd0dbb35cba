//! Error types raised while building a machine from its startup configuration.

use thiserror::Error;

/// Errors that can occur while initializing the ingredient ledger or the machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InitializationError {
    /// A starting quantity was below zero.
    #[error("Negative quantity for {ingredient}: {quantity}")]
    NegativeQuantity { ingredient: String, quantity: i64 },

    /// A starting quantity does not fit in the ledger's counters.
    #[error("Quantity for {ingredient} is too large: {quantity}")]
    QuantityOverflow { ingredient: String, quantity: i64 },

    /// The same ingredient was listed more than once.
    #[error("Ingredient listed twice: {0}")]
    DuplicateIngredient(String),

    /// The machine needs at least one outlet to serve beverages.
    #[error("Invalid outlet count: {0}")]
    InvalidOutletCount(usize),

    /// `init` was called on a machine that is already running.
    #[error("Machine already initialized")]
    AlreadyInitialized,
}

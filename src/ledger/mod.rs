//! # Ingredient Ledger
//!
//! The [`ResourceLedger`] is the only shared mutable state in the machine. It maps every
//! tracked ingredient to its own `AtomicU64` counter.
//!
//! ## Concurrency Model
//!
//! The set of ingredients is fixed when the ledger is built, so the map itself is never
//! mutated and needs no lock. Every operation touches exactly one counter:
//!
//! - Decrements run a compare-and-swap loop that refuses to go below zero.
//! - Increments are a single atomic add.
//!
//! Two beverages that share no ingredient never contend with each other. Two beverages
//! that share an ingredient are serialized on that ingredient's counter only.
//!
//! ```rust
//! use beverage_machine::ledger::ResourceLedger;
//!
//! let ledger = ResourceLedger::new([("water", 500), ("sugar", 100)]).unwrap();
//!
//! assert!(ledger.try_decrement("sugar", 100));
//! assert!(!ledger.try_decrement("sugar", 1));
//! assert_eq!(ledger.increment("sugar", 20), 20);
//! assert!(!ledger.try_decrement("coffee", 1)); // untracked
//! ```

pub mod error;

pub use error::*;

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Per-ingredient atomic counters for the machine's inventory.
#[derive(Debug)]
pub struct ResourceLedger {
    items: HashMap<String, AtomicU64>,
}

impl ResourceLedger {
    /// Builds a ledger from starting quantities.
    ///
    /// Quantities are accepted as signed integers because they usually come straight from
    /// an external configuration; anything negative or larger than `u32::MAX` is rejected.
    /// Counters are 64-bit, so starting stock plus any number of `u32` additions a process
    /// can realistically perform never wraps.
    pub fn new<I, K>(quantities: I) -> Result<Self, InitializationError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut items = HashMap::new();
        for (ingredient, quantity) in quantities {
            let ingredient = ingredient.into();
            if quantity < 0 {
                return Err(InitializationError::NegativeQuantity { ingredient, quantity });
            }
            let Ok(start) = u32::try_from(quantity) else {
                return Err(InitializationError::QuantityOverflow { ingredient, quantity });
            };
            if items.contains_key(&ingredient) {
                return Err(InitializationError::DuplicateIngredient(ingredient));
            }
            items.insert(ingredient, AtomicU64::new(u64::from(start)));
        }
        info!(ingredients = items.len(), "Ledger initialized");
        Ok(Self { items })
    }

    /// Returns `true` if the ledger tracks this ingredient.
    pub fn contains(&self, ingredient: &str) -> bool {
        self.items.contains_key(ingredient)
    }

    /// Current quantity of a tracked ingredient.
    pub fn quantity(&self, ingredient: &str) -> Option<u64> {
        self.items.get(ingredient).map(|qty| qty.load(Ordering::Acquire))
    }

    /// Atomically removes `amount` units if at least that many are available.
    ///
    /// Returns `false` without touching anything when the ingredient is not tracked or
    /// holds fewer than `amount` units. Taking the last unit is a success.
    pub fn try_decrement(&self, ingredient: &str, amount: u32) -> bool {
        let Some(counter) = self.items.get(ingredient) else {
            return false;
        };
        let wanted = u64::from(amount);
        let result = counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |qty| {
            qty.checked_sub(wanted)
        });
        match result {
            Ok(previous) => {
                debug!(ingredient, amount, remaining = previous - wanted, "Decremented");
                true
            }
            Err(available) => {
                debug!(ingredient, amount, available, "Insufficient");
                false
            }
        }
    }

    /// Atomically adds `amount` units and returns the new quantity.
    ///
    /// Untracked ingredients are left alone and report `0`. Every unit added is kept, so a
    /// rollback that lands after a large refill still restores exactly what it took.
    pub fn increment(&self, ingredient: &str, amount: u32) -> u64 {
        let Some(counter) = self.items.get(ingredient) else {
            return 0;
        };
        let amount = u64::from(amount);
        counter.fetch_add(amount, Ordering::AcqRel) + amount
    }

    /// Point-in-time copy of every quantity. Each entry is one atomic read.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.items
            .iter()
            .map(|(ingredient, qty)| (ingredient.clone(), qty.load(Ordering::Acquire)))
            .collect()
    }

    /// Ingredients whose quantity is exactly zero right now.
    pub fn zero_quantity_resources(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter(|(_, qty)| qty.load(Ordering::Acquire) == 0)
            .map(|(ingredient, _)| ingredient.clone())
            .collect()
    }

    /// Number of tracked ingredients.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

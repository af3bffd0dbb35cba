//! # Reservation Coordinator
//!
//! Reserves every ingredient of one beverage against the shared [`ResourceLedger`].
//!
//! There is no lock around the whole beverage. Each ingredient is decremented on its own;
//! if any of them comes up short, the coordinator hands back exactly the amounts it took.
//! Additions and subtractions on a counter commute, so the compensation is correct no
//! matter what other beverages did to the same counters in between. Other beverages may
//! briefly observe the reduced quantity and fail; totals are never corrupted.

use crate::ledger::ResourceLedger;
use crate::model::{Beverage, Outcome};
use tracing::{debug, instrument};

/// Applies one beverage's reservations to the ledger.
#[derive(Debug, Clone, Copy)]
pub struct ReservationCoordinator<'a> {
    ledger: &'a ResourceLedger,
}

impl<'a> ReservationCoordinator<'a> {
    pub fn new(ledger: &'a ResourceLedger) -> Self {
        Self { ledger }
    }

    /// Reserves the beverage's ingredients, rolling back on partial failure.
    ///
    /// Ingredients the ledger does not track are skipped. Every tracked ingredient is
    /// attempted; the reported ingredient is the first failure in declaration order.
    #[instrument(skip_all, fields(beverage = %beverage.name))]
    pub fn reserve(&self, beverage: &Beverage) -> Outcome {
        let mut reserved: Vec<(&str, u32)> = Vec::new();
        let mut short: Vec<&str> = Vec::new();

        for (ingredient, required) in beverage.ingredients() {
            if !self.ledger.contains(ingredient) {
                debug!(ingredient, "Untracked ingredient skipped");
                continue;
            }
            if self.ledger.try_decrement(ingredient, required) {
                reserved.push((ingredient, required));
            } else {
                short.push(ingredient);
            }
        }

        let Some(first_short) = short.first() else {
            debug!(reserved = reserved.len(), "Prepared");
            return Outcome::Prepared;
        };

        for (ingredient, amount) in &reserved {
            self.ledger.increment(ingredient, *amount);
        }
        debug!(
            ingredient = *first_short,
            rolled_back = reserved.len(),
            "Insufficient, reservations returned"
        );
        Outcome::Insufficient {
            ingredient: first_short.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn ledger() -> ResourceLedger {
        ResourceLedger::new([("water", 500), ("milk", 500), ("sugar", 100)]).unwrap()
    }

    #[test]
    fn test_prepared_consumes_everything() {
        let ledger = ledger();
        let tea = Beverage::from_ingredients("tea", [("water", 200), ("sugar", 100)]);

        let outcome = ReservationCoordinator::new(&ledger).reserve(&tea);

        assert_eq!(outcome, Outcome::Prepared);
        assert_eq!(ledger.quantity("water"), Some(300));
        assert_eq!(ledger.quantity("sugar"), Some(0));
    }

    #[test]
    fn test_partial_failure_rolls_back() {
        let ledger = ledger();
        let latte =
            Beverage::from_ingredients("latte", [("water", 100), ("sugar", 150), ("milk", 50)]);

        let outcome = ReservationCoordinator::new(&ledger).reserve(&latte);

        assert_eq!(
            outcome,
            Outcome::Insufficient {
                ingredient: "sugar".into()
            }
        );
        assert_eq!(ledger.quantity("water"), Some(500));
        assert_eq!(ledger.quantity("milk"), Some(500));
        assert_eq!(ledger.quantity("sugar"), Some(100));
    }

    #[test]
    fn test_reports_first_short_ingredient_in_declaration_order() {
        let ledger = ResourceLedger::new([("water", 10), ("sugar", 10)]).unwrap();
        let a = Beverage::from_ingredients("a", [("sugar", 50), ("water", 50)]);
        let b = Beverage::from_ingredients("b", [("water", 50), ("sugar", 50)]);

        let coordinator = ReservationCoordinator::new(&ledger);
        assert_eq!(
            coordinator.reserve(&a),
            Outcome::Insufficient { ingredient: "sugar".into() }
        );
        assert_eq!(
            coordinator.reserve(&b),
            Outcome::Insufficient { ingredient: "water".into() }
        );
    }

    #[test]
    fn test_untracked_ingredient_never_blocks() {
        let ledger = ledger();
        let green_tea =
            Beverage::from_ingredients("green_tea", [("green_mixture", 30), ("water", 100)]);

        let outcome = ReservationCoordinator::new(&ledger).reserve(&green_tea);
        assert_eq!(outcome, Outcome::Prepared);
        assert_eq!(ledger.quantity("water"), Some(400));
    }

    #[test]
    fn test_beverage_without_ingredients_is_prepared() {
        let ledger = ledger();
        let air = Beverage::new("air");
        let outcome = ReservationCoordinator::new(&ledger).reserve(&air);
        assert_eq!(outcome, Outcome::Prepared);
        assert_eq!(ledger.snapshot(), self::ledger().snapshot());
    }

    #[test]
    fn test_contention_conserves_totals() {
        // Each beverage needs one unit of both; only 50 pairs exist, and rollbacks from
        // losers interleave freely with winners.
        let ledger = Arc::new(ResourceLedger::new([("water", 50), ("sugar", 80)]).unwrap());
        let prepared: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|worker| {
                    let ledger = Arc::clone(&ledger);
                    scope.spawn(move || {
                        let coordinator = ReservationCoordinator::new(&ledger);
                        (0..25)
                            .map(|i| {
                                let order = if (worker + i) % 2 == 0 {
                                    [("water", 1), ("sugar", 1)]
                                } else {
                                    [("sugar", 1), ("water", 1)]
                                };
                                Beverage::from_ingredients(format!("b{worker}_{i}"), order)
                            })
                            .filter(|beverage| coordinator.reserve(beverage).is_prepared())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        let water = ledger.quantity("water").unwrap() as usize;
        let sugar = ledger.quantity("sugar").unwrap() as usize;
        assert_eq!(50 - water, prepared);
        assert_eq!(80 - sugar, prepared);
        assert_eq!(prepared, 50);
    }
}

//! # Machine Configuration
//!
//! Serde DTOs matching the machine's JSON input:
//!
//! ```json
//! {
//!   "machine": {
//!     "outlets": { "count_n": 3 },
//!     "total_items_quantity": { "hot_water": 500, "sugar_syrup": 100 },
//!     "beverages": {
//!       "hot_tea": { "hot_water": 200, "sugar_syrup": 10 }
//!     }
//!   }
//! }
//! ```
//!
//! Reading the file is up to the caller; any serde format works.
//!
//! Beverages are listed by name in sorted order. The ingredients of each beverage keep the
//! order in which the document declares them, since that order decides which ingredient is
//! reported when several run short.

use crate::model::Beverage;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level wrapper around [`MachineConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInput {
    pub machine: MachineConfig,
}

/// Startup configuration for a [`BeverageMachine`](super::BeverageMachine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    pub outlets: OutletConfig,
    /// Starting quantity per ingredient. Signed so that bad input is reported instead of
    /// failing to parse.
    pub total_items_quantity: BTreeMap<String, i64>,
    #[serde(default)]
    pub beverages: BTreeMap<String, Recipe>,
}

/// One beverage's ingredients, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe(Vec<(String, u32)>);

impl Recipe {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(ingredient, qty)| (ingredient.as_str(), *qty))
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for Recipe {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, qty)| (k.into(), qty)).collect())
    }
}

impl Serialize for Recipe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (ingredient, qty) in &self.0 {
            map.serialize_entry(ingredient, qty)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecipeVisitor;

        impl<'de> Visitor<'de> for RecipeVisitor {
            type Value = Recipe;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of ingredient names to quantities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Recipe, A::Error> {
                let mut ingredients = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((ingredient, qty)) = access.next_entry::<String, u32>()? {
                    ingredients.push((ingredient, qty));
                }
                Ok(Recipe(ingredients))
            }
        }

        deserializer.deserialize_map(RecipeVisitor)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutletConfig {
    pub count_n: usize,
}

impl MachineConfig {
    pub fn new(outlets: usize, total_items_quantity: BTreeMap<String, i64>) -> Self {
        Self {
            outlets: OutletConfig { count_n: outlets },
            total_items_quantity,
            beverages: BTreeMap::new(),
        }
    }

    /// The configured beverages, sorted by name. Ingredients keep their declared order.
    pub fn beverages(&self) -> Vec<Beverage> {
        self.beverages
            .iter()
            .map(|(name, recipe)| Beverage::from_ingredients(name.as_str(), recipe.iter()))
            .collect()
    }
}

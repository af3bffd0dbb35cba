/// A beverage request: a name plus the ingredients it consumes.
///
/// Ingredients keep the order in which they were declared. That order decides which
/// ingredient is reported when more than one of them runs short, so it is part of the
/// request rather than an accident of hashing.
///
/// ```rust
/// use beverage_machine::model::Beverage;
///
/// let tea = Beverage::new("hot_tea")
///     .with_ingredient("hot_water", 200)
///     .with_ingredient("sugar_syrup", 10);
///
/// assert_eq!(tea.required("hot_water"), Some(200));
/// assert_eq!(tea.ingredients().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beverage {
    pub name: String,
    ingredients: Vec<(String, u32)>,
}

impl Beverage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Builds a beverage from `(ingredient, quantity)` pairs in iteration order.
    pub fn from_ingredients<I, K>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        ingredients
            .into_iter()
            .fold(Self::new(name), |beverage, (ingredient, quantity)| {
                beverage.with_ingredient(ingredient, quantity)
            })
    }

    /// Adds an ingredient requirement.
    ///
    /// Declaring the same ingredient again replaces its quantity but keeps its original
    /// position.
    pub fn with_ingredient(mut self, ingredient: impl Into<String>, quantity: u32) -> Self {
        let ingredient = ingredient.into();
        match self.ingredients.iter_mut().find(|(name, _)| *name == ingredient) {
            Some((_, existing)) => *existing = quantity,
            None => self.ingredients.push((ingredient, quantity)),
        }
        self
    }

    /// Ingredients in declaration order.
    pub fn ingredients(&self) -> impl Iterator<Item = (&str, u32)> {
        self.ingredients.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn required(&self, ingredient: &str) -> Option<u32> {
        self.ingredients
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, qty)| *qty)
    }
}

use std::fmt::Display;

/// What happened to a single beverage.
///
/// Running out of an ingredient is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every tracked ingredient was reserved.
    Prepared,
    /// The first ingredient (in declaration order) that was short.
    Insufficient { ingredient: String },
}

impl Outcome {
    pub fn is_prepared(&self) -> bool {
        matches!(self, Outcome::Prepared)
    }
}

/// Outcome of one beverage in a batch, tagged with the beverage name.
///
/// `Display` renders the machine's output lines:
///
/// ```rust
/// use beverage_machine::model::{Outcome, Report};
///
/// let ok = Report::new("hot_tea", Outcome::Prepared);
/// assert_eq!(ok.to_string(), "hot_tea is prepared");
///
/// let outcome = Outcome::Insufficient { ingredient: "hot_water".into() };
/// let short = Report::new("black_tea", outcome);
/// assert_eq!(
///     short.to_string(),
///     "black_tea cannot be prepared because hot_water is not sufficient"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub beverage: String,
    pub outcome: Outcome,
}

impl Report {
    pub fn new(beverage: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            beverage: beverage.into(),
            outcome,
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Outcome::Prepared => write!(f, "{} is prepared", self.beverage),
            Outcome::Insufficient { ingredient } => write!(
                f,
                "{} cannot be prepared because {} is not sufficient",
                self.beverage, ingredient
            ),
        }
    }
}

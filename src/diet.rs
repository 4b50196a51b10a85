use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecipeError;

/// A dietary restriction class.
///
/// Classes form a strictness partial order: an ingredient tagged with a
/// stricter class also satisfies every looser class above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietClass {
    Vegan,
    Vegetarian,
    Pescatarian,
    Omnivore,
}

use DietClass::*;

impl DietClass {
    pub const ALL: [DietClass; 4] = [Vegan, Vegetarian, Pescatarian, Omnivore];

    /// Requested classes an ingredient tagged with `self` is allowed in.
    /// Adding a class means adding one row here and one entry to `ALL`.
    const fn satisfies_table(self) -> &'static [DietClass] {
        match self {
            Vegan => &[Vegan, Vegetarian, Pescatarian, Omnivore],
            Vegetarian => &[Vegetarian, Pescatarian, Omnivore],
            Pescatarian => &[Pescatarian, Omnivore],
            Omnivore => &[Omnivore],
        }
    }

    /// Whether an ingredient tagged `self` may be served to someone requesting `requested`.
    pub fn satisfies(self, requested: DietClass) -> bool {
        self.satisfies_table().contains(&requested)
    }

    /// Whether any tag in `tags` satisfies `requested`.
    pub fn any_satisfies(tags: &[DietClass], requested: DietClass) -> bool {
        tags.iter().any(|tag| tag.satisfies(requested))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vegan => "vegan",
            Vegetarian => "vegetarian",
            Pescatarian => "pescatarian",
            Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for DietClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietClass {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegan" => Ok(Vegan),
            "vegetarian" | "veg" => Ok(Vegetarian),
            "pescatarian" | "pescetarian" => Ok(Pescatarian),
            "omnivore" | "non-vegetarian" | "non-veg" | "nonveg" | "any" => Ok(Omnivore),
            other => Err(RecipeError::InvalidTarget(format!(
                "Unknown diet class: '{}'",
                other
            ))),
        }
    }
}

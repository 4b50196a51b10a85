use serde::{Deserialize, Serialize};

use crate::diet::DietClass;
use crate::error::RecipeError;

/// Atwater factors, kcal per gram
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// A catalog entry. Macro and calorie values are per 100g reference serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
    /// Diet classes this ingredient satisfies
    #[serde(default)]
    pub diets: Vec<DietClass>,
    /// Allergen/exclusion tags matched against a target's avoid list
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Ingredient {
    /// Calories derived from the macro grams rather than the declared value
    pub fn macro_calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN
            + self.carbs * KCAL_PER_G_CARBS
            + self.fat * KCAL_PER_G_FAT
    }

    /// True when an avoid term names this ingredient or one of its tags
    pub fn is_excluded_by(&self, avoid: &[String]) -> bool {
        let name = self.name.trim().to_lowercase();
        avoid.iter().any(|term| {
            let term = term.trim().to_lowercase();
            name == term || self.tags.iter().any(|tag| tag.trim().to_lowercase() == term)
        })
    }

    pub fn summary(&self) -> IngredientSummary {
        IngredientSummary {
            name: self.name.clone(),
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            calories: self.calories,
        }
    }
}

/// Aggregate macros in grams plus calories
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
}

impl MacroTotals {
    /// Totals with calories derived by the 4/4/9 convention
    pub fn from_grams(protein: f64, carbs: f64, fat: f64) -> Self {
        MacroTotals {
            protein,
            carbs,
            fat,
            calories: protein * KCAL_PER_G_PROTEIN
                + carbs * KCAL_PER_G_CARBS
                + fat * KCAL_PER_G_FAT,
        }
    }

    /// Add `grams` of an ingredient whose values are per 100g
    pub fn add_portion(&mut self, ingredient: &Ingredient, grams: f64) {
        let factor = grams / 100.0;
        self.protein += ingredient.protein * factor;
        self.carbs += ingredient.carbs * factor;
        self.fat += ingredient.fat * factor;
        self.calories += ingredient.calories * factor;
    }

    /// Share of macro calories per macro as (protein, carbs, fat).
    /// All zero when there are no macro calories.
    pub fn calorie_shares(&self) -> (f64, f64, f64) {
        let p = self.protein * KCAL_PER_G_PROTEIN;
        let c = self.carbs * KCAL_PER_G_CARBS;
        let f = self.fat * KCAL_PER_G_FAT;
        let total = p + c + f;
        if total <= f64::EPSILON {
            return (0.0, 0.0, 0.0);
        }
        (p / total, c / total, f / total)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.protein, self.carbs, self.fat]
    }
}

/// Loosely typed request as a caller deserializes it from JSON
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetRequest {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub diet: String,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub cuisine: String,
}

/// A validated nutrient target. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TargetRequest")]
pub struct NutrientTarget {
    protein: u32,
    carbs: u32,
    fat: u32,
    diet: DietClass,
    avoid: Vec<String>,
    cuisine: String,
}

impl NutrientTarget {
    pub fn new(protein: u32, carbs: u32, fat: u32, diet: DietClass) -> Self {
        NutrientTarget {
            protein,
            carbs,
            fat,
            diet,
            avoid: Vec::new(),
            cuisine: String::new(),
        }
    }

    /// Set the avoid list. Terms are trimmed and lower-cased, blanks dropped.
    pub fn with_avoid<I, S>(mut self, avoid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.avoid = avoid
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into().trim().to_string();
        self
    }

    pub fn protein(&self) -> u32 {
        self.protein
    }

    pub fn carbs(&self) -> u32 {
        self.carbs
    }

    pub fn fat(&self) -> u32 {
        self.fat
    }

    pub fn diet(&self) -> DietClass {
        self.diet
    }

    pub fn avoid(&self) -> &[String] {
        &self.avoid
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    pub fn macros(&self) -> MacroTotals {
        MacroTotals::from_grams(self.protein as f64, self.carbs as f64, self.fat as f64)
    }

    /// Whether `ingredient` passes this target's diet and avoid filters
    pub fn admits(&self, ingredient: &Ingredient) -> bool {
        DietClass::any_satisfies(&ingredient.diets, self.diet)
            && !ingredient.is_excluded_by(&self.avoid)
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32, RecipeError> {
    u32::try_from(value).map_err(|_| {
        RecipeError::InvalidTarget(format!(
            "{} must be a non-negative number of grams, got {}",
            field, value
        ))
    })
}

impl TryFrom<TargetRequest> for NutrientTarget {
    type Error = RecipeError;

    fn try_from(request: TargetRequest) -> Result<Self, Self::Error> {
        let diet: DietClass = request.diet.parse()?;
        Ok(NutrientTarget::new(
            non_negative("protein", request.protein)?,
            non_negative("carbs", request.carbs)?,
            non_negative("fat", request.fat)?,
            diet,
        )
        .with_avoid(&request.avoid)
        .with_cuisine(request.cuisine))
    }
}

/// Serialization shape of a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub name: String,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
}

/// A catalog ingredient with its distance to the target (lower is closer)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredIngredient {
    pub ingredient: Ingredient,
    pub score: f64,
}

/// Ordered search output, closest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub candidates: Vec<ScoredIngredient>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|c| c.ingredient.name.as_str())
            .collect()
    }

    /// The first `n` ingredients, for callers that take the top of the ranking
    pub fn top(&self, n: usize) -> Vec<Ingredient> {
        self.candidates
            .iter()
            .take(n)
            .map(|c| c.ingredient.clone())
            .collect()
    }

    pub fn summaries(&self) -> Vec<IngredientSummary> {
        self.candidates
            .iter()
            .map(|c| c.ingredient.summary())
            .collect()
    }
}

/// An ingredient with its resolved quantity in grams
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionedIngredient {
    pub ingredient: Ingredient,
    pub grams: f64,
}

impl PortionedIngredient {
    pub fn macros(&self) -> MacroTotals {
        let mut totals = MacroTotals::default();
        totals.add_portion(&self.ingredient, self.grams);
        totals
    }
}

/// One preparation instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
}

/// An assembled recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub title: String,
    pub steps: Vec<Step>,
    pub ingredients: Vec<PortionedIngredient>,
    /// Achieved totals over all portions
    pub totals: MacroTotals,
    /// The macros that were asked for
    pub target: MacroTotals,
    /// Free-form text from an external renderer, if one was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

mod solver;
mod steps;

pub use solver::{solve, tolerance_bands, within_tolerance, Portioning};
pub use steps::{
    compose_title, cuisine_label, prepare_steps, HIGH_CARBS_SHARE, HIGH_FAT_SHARE,
    HIGH_PROTEIN_SHARE,
};

use log::{debug, warn};
use std::collections::HashSet;

use crate::config::SolverConfig;
use crate::error::{RecipeError, Result};
use crate::model::{Ingredient, NutrientTarget, PortionedIngredient, Recipe};

/// Turns a curated ingredient list into a portioned recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeAssembler {
    solver: SolverConfig,
}

impl RecipeAssembler {
    pub fn new(solver: SolverConfig) -> Self {
        RecipeAssembler { solver }
    }

    /// Solve portions, then template steps and a title.
    ///
    /// # Errors
    /// - `InsufficientIngredients` when `ingredients` is empty
    /// - `UnsatisfiableTarget` when no portions within the serving range land
    ///   inside the tolerance band; it carries the closest totals found
    pub fn assemble(&self, ingredients: &[Ingredient], target: &NutrientTarget) -> Result<Recipe> {
        if ingredients.is_empty() {
            return Err(RecipeError::InsufficientIngredients);
        }

        let distinct = distinct_by_name(ingredients);
        let wanted = target.macros();
        let portioning = solve(&distinct, &wanted, &self.solver);

        if !portioning.within_tolerance {
            warn!(
                "Target {}g/{}g/{}g not reachable with {} ingredients",
                target.protein(),
                target.carbs(),
                target.fat(),
                distinct.len()
            );
            return Err(RecipeError::UnsatisfiableTarget {
                best: portioning.totals,
            });
        }

        let portions: Vec<PortionedIngredient> = distinct
            .into_iter()
            .zip(portioning.grams)
            .map(|(ingredient, grams)| PortionedIngredient { ingredient, grams })
            .collect();

        let steps = prepare_steps(&portions, target.cuisine());
        let title = compose_title(&portioning.totals, &portions, target.cuisine());
        debug!("Assembled '{}' with {} steps", title, steps.len());

        Ok(Recipe {
            title,
            steps,
            ingredients: portions,
            totals: portioning.totals,
            target: wanted,
            narrative: None,
        })
    }
}

/// Drop repeated names (case-insensitive), keeping first occurrences in order
fn distinct_by_name(ingredients: &[Ingredient]) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    let distinct: Vec<Ingredient> = ingredients
        .iter()
        .filter(|ingredient| seen.insert(ingredient.name.trim().to_lowercase()))
        .cloned()
        .collect();
    if distinct.len() < ingredients.len() {
        debug!(
            "Merged {} repeated ingredients",
            ingredients.len() - distinct.len()
        );
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::DietClass;

    fn ingredient(name: &str, p: f64, c: f64, f: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            protein: p,
            carbs: c,
            fat: f,
            calories: p * 4.0 + c * 4.0 + f * 9.0,
            diets: vec![DietClass::Vegan],
            tags: vec![],
        }
    }

    fn pantry() -> Vec<Ingredient> {
        vec![
            ingredient("seitan", 75.0, 14.0, 1.9),
            ingredient("quinoa", 4.4, 21.0, 1.9),
            ingredient("olive oil", 0.0, 0.0, 100.0),
        ]
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        let target = NutrientTarget::new(10, 10, 10, DietClass::Vegan);
        let result = RecipeAssembler::default().assemble(&[], &target);
        assert!(matches!(result, Err(RecipeError::InsufficientIngredients)));
    }

    #[test]
    fn test_assemble_hits_target() {
        let target = NutrientTarget::new(40, 50, 15, DietClass::Vegan).with_cuisine("thai");
        let recipe = RecipeAssembler::default()
            .assemble(&pantry(), &target)
            .unwrap();

        assert!((recipe.totals.protein - 40.0).abs() <= 4.0);
        assert!((recipe.totals.carbs - 50.0).abs() <= 5.0);
        assert!((recipe.totals.fat - 15.0).abs() <= 2.0);
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.steps.len(), 5);
        assert!(recipe.title.contains("Thai"));
        assert!(recipe.narrative.is_none());
    }

    #[test]
    fn test_output_ingredients_come_from_input() {
        let input = pantry();
        let target = NutrientTarget::new(40, 50, 15, DietClass::Vegan);
        let recipe = RecipeAssembler::default().assemble(&input, &target).unwrap();
        for portion in &recipe.ingredients {
            assert!(input.contains(&portion.ingredient));
        }
    }

    #[test]
    fn test_unreachable_target_reports_best_totals() {
        let target = NutrientTarget::new(500, 0, 0, DietClass::Vegan);
        let input = vec![ingredient("quinoa", 4.4, 21.0, 1.9)];
        let err = RecipeAssembler::default().assemble(&input, &target).unwrap_err();
        match err {
            RecipeError::UnsatisfiableTarget { best } => {
                assert!(best.protein > 0.0);
                assert!(best.protein < 500.0);
            }
            other => panic!("expected UnsatisfiableTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_ingredients_merged() {
        let mut input = pantry();
        input.push(ingredient("Quinoa", 4.4, 21.0, 1.9));
        let target = NutrientTarget::new(40, 50, 15, DietClass::Vegan);
        let recipe = RecipeAssembler::default().assemble(&input, &target).unwrap();
        assert_eq!(recipe.ingredients.len(), 3);
    }
}

//! Ingredient search: filter the catalog by diet and avoid list, then rank
//! what is left by how well each ingredient's macro profile fits the target.
//!
//! The distance has two parts:
//!
//! - a weighted Euclidean distance between the ingredient's calorie-share
//!   vector (protein, carbs, fat) and the target's, skipped when the target
//!   has no macro calories at all;
//! - a calorie-density term comparing the ingredient's kcal per 100g with
//!   the target's calories split over [`ASSUMED_PORTIONS`] ingredients.
//!
//! Shares are computed with a zero guard, so an all-zero target ranks purely
//! by calorie density.

use log::debug;
use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::config::SelectorConfig;
use crate::model::{Ingredient, MacroTotals, NutrientTarget, ScoredIngredient, SelectionResult};

/// Number of ingredients a target is assumed to be spread over
pub const ASSUMED_PORTIONS: f64 = 4.0;

/// Ranks catalog ingredients against a nutrient target
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientSelector {
    weights: SelectorConfig,
}

impl IngredientSelector {
    pub fn new(weights: SelectorConfig) -> Self {
        IngredientSelector { weights }
    }

    /// Filter and rank the whole catalog. Never capped; may be empty.
    pub fn search(&self, catalog: &Catalog, target: &NutrientTarget) -> SelectionResult {
        let mut candidates: Vec<ScoredIngredient> = catalog
            .ingredients()
            .iter()
            .filter(|ingredient| target.admits(ingredient))
            .map(|ingredient| ScoredIngredient {
                score: self.score(ingredient, target),
                ingredient: ingredient.clone(),
            })
            .collect();

        candidates.sort_by(rank_order);

        debug!(
            "Search for {} ({}g protein, {}g carbs, {}g fat) kept {} of {} ingredients",
            target.diet(),
            target.protein(),
            target.carbs(),
            target.fat(),
            candidates.len(),
            catalog.len()
        );

        SelectionResult { candidates }
    }

    /// Distance of one ingredient to the target, lower is better
    pub fn score(&self, ingredient: &Ingredient, target: &NutrientTarget) -> f64 {
        let wanted = target.macros();
        let offered = MacroTotals::from_grams(ingredient.protein, ingredient.carbs, ingredient.fat);

        let macro_term = if wanted.calories > 0.0 {
            let (tp, tc, tf) = wanted.calorie_shares();
            let (ip, ic, if_) = offered.calorie_shares();
            (self.weights.protein_weight * (ip - tp).powi(2)
                + self.weights.carbs_weight * (ic - tc).powi(2)
                + self.weights.fat_weight * (if_ - tf).powi(2))
            .sqrt()
        } else {
            0.0
        };

        let implied_kcal = wanted.calories / ASSUMED_PORTIONS;
        let calorie_term =
            self.weights.calorie_weight * (ingredient.calories - implied_kcal).abs() / 100.0;

        macro_term + calorie_term
    }
}

/// Order two scored ingredients the way search results are ordered
pub fn rank_order(a: &ScoredIngredient, b: &ScoredIngredient) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.ingredient.name.cmp(&b.ingredient.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet::DietClass;

    fn ingredient(name: &str, p: f64, c: f64, f: f64, diets: &[DietClass]) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            protein: p,
            carbs: c,
            fat: f,
            calories: p * 4.0 + c * 4.0 + f * 9.0,
            diets: diets.to_vec(),
            tags: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ingredient("chicken breast", 31.0, 0.0, 3.6, &[DietClass::Omnivore]),
            ingredient("tofu", 8.0, 1.9, 4.8, &[DietClass::Vegan]),
            ingredient("rice", 2.7, 28.0, 0.3, &[DietClass::Vegan]),
            ingredient("olive oil", 0.0, 0.0, 100.0, &[DietClass::Vegan]),
            ingredient("eggs", 13.0, 1.1, 11.0, &[DietClass::Vegetarian]),
        ])
        .unwrap()
    }

    #[test]
    fn test_protein_heavy_target_prefers_protein() {
        let selector = IngredientSelector::default();
        let target = NutrientTarget::new(60, 5, 5, DietClass::Omnivore);
        let result = selector.search(&catalog(), &target);
        assert_eq!(result.names()[0], "chicken breast");
        assert_eq!(*result.names().last().unwrap(), "olive oil");
    }

    #[test]
    fn test_carb_heavy_target_prefers_rice() {
        let selector = IngredientSelector::default();
        let target = NutrientTarget::new(5, 80, 2, DietClass::Vegan);
        let result = selector.search(&catalog(), &target);
        assert_eq!(result.names()[0], "rice");
    }

    #[test]
    fn test_zero_target_ranks_by_calories() {
        let selector = IngredientSelector::default();
        let target = NutrientTarget::new(0, 0, 0, DietClass::Omnivore);
        let result = selector.search(&catalog(), &target);
        assert_eq!(result.len(), 5);
        assert!(result.candidates.iter().all(|c| c.score.is_finite()));
        assert_eq!(result.names()[0], "tofu");
        assert_eq!(*result.names().last().unwrap(), "olive oil");
    }

    #[test]
    fn test_ties_broken_by_name() {
        let catalog = Catalog::new(vec![
            ingredient("b", 10.0, 10.0, 1.0, &[DietClass::Vegan]),
            ingredient("a", 10.0, 10.0, 1.0, &[DietClass::Vegan]),
        ])
        .unwrap();
        let result = IngredientSelector::default()
            .search(&catalog, &NutrientTarget::new(0, 0, 0, DietClass::Vegan));
        assert_eq!(result.names(), vec!["a", "b"]);
        assert_eq!(
            rank_order(&result.candidates[0], &result.candidates[1]),
            Ordering::Less
        );
    }

    #[test]
    fn test_weights_change_ranking() {
        // "lean" is all protein; "nutty" splits its calories between protein and fat
        let catalog = Catalog::new(vec![
            ingredient("lean", 20.0, 0.0, 0.0, &[DietClass::Vegan]),
            ingredient("nutty", 9.0, 0.0, 4.0, &[DietClass::Vegan]),
        ])
        .unwrap();
        let target = NutrientTarget::new(10, 10, 0, DietClass::Vegan);

        let only_fat = IngredientSelector::new(SelectorConfig {
            protein_weight: 0.0,
            carbs_weight: 0.0,
            fat_weight: 1.0,
            calorie_weight: 0.0,
        });
        assert_eq!(only_fat.search(&catalog, &target).names()[0], "lean");

        let only_protein = IngredientSelector::new(SelectorConfig {
            protein_weight: 1.0,
            carbs_weight: 0.0,
            fat_weight: 0.0,
            calorie_weight: 0.0,
        });
        assert_eq!(only_protein.search(&catalog, &target).names()[0], "nutty");
    }

    #[test]
    fn test_empty_after_filtering() {
        let target = NutrientTarget::new(10, 10, 10, DietClass::Vegan)
            .with_avoid(["tofu", "rice", "olive oil"]);
        let result = IngredientSelector::default().search(&catalog(), &target);
        assert!(result.is_empty());
    }
}

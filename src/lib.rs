//! Macro-targeted ingredient selection and recipe assembly.
//!
//! Two stateless operations over a read-only ingredient catalog:
//!
//! - [`search_ingredients`] filters the catalog by diet class and avoid list,
//!   then ranks what is left by distance to the target's macro profile.
//! - [`generate_recipe`] portions a curated ingredient list so the totals land
//!   within tolerance of the target, and templates a title and steps.
//!
//! ```
//! use recipe_book::{generate_recipe, search_ingredients, Catalog, DietClass, NutrientTarget};
//!
//! let catalog = Catalog::embedded().unwrap();
//! let target = NutrientTarget::new(40, 50, 15, DietClass::Vegetarian).with_cuisine("italian");
//!
//! let ranked = search_ingredients(&catalog, &target);
//! assert!(!ranked.names().contains(&"chicken breast"));
//!
//! let picked = catalog.resolve(&["greek yogurt", "quinoa", "olive oil"]).unwrap();
//! let recipe = generate_recipe(&picked, &target).unwrap();
//! assert_eq!(recipe.ingredients.len(), 3);
//! ```

pub mod assembler;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod diet;
pub mod error;
pub mod model;
pub mod renderers;
pub mod selector;

pub use crate::assembler::RecipeAssembler;
pub use crate::builder::{RecipeBook, RecipeBookBuilder};
pub use crate::catalog::{Catalog, SharedCatalog};
pub use crate::config::EngineConfig;
pub use crate::diet::DietClass;
pub use crate::error::{RecipeError, Result};
pub use crate::model::{
    Ingredient, IngredientSummary, MacroTotals, NutrientTarget, PortionedIngredient, Recipe,
    ScoredIngredient, SelectionResult, Step, TargetRequest,
};
pub use crate::renderers::{OpenAIRenderer, RecipeRenderer, RendererFactory, TemplateRenderer};
pub use crate::selector::IngredientSelector;

use log::warn;

/// Rank `catalog` against `target` with the default weights.
///
/// Returns every ingredient that passes the diet and avoid filters, closest
/// first. An empty result is not an error.
pub fn search_ingredients(catalog: &Catalog, target: &NutrientTarget) -> SelectionResult {
    IngredientSelector::default().search(catalog, target)
}

/// Portion `ingredients` for `target` with the default serving range and tolerance.
///
/// # Errors
/// `InsufficientIngredients` for an empty list, `UnsatisfiableTarget` when no
/// portions meet the tolerance band.
pub fn generate_recipe(ingredients: &[Ingredient], target: &NutrientTarget) -> Result<Recipe> {
    RecipeAssembler::default().assemble(ingredients, target)
}

/// Like [`generate_recipe`], then asks `renderer` for prose and stores it as
/// the recipe's narrative. Quantities are fixed before the renderer is called.
pub async fn generate_recipe_with_renderer(
    ingredients: &[Ingredient],
    target: &NutrientTarget,
    renderer: &dyn RecipeRenderer,
) -> Result<Recipe> {
    generate_recipe_with(&RecipeAssembler::default(), ingredients, target, renderer).await
}

pub(crate) async fn generate_recipe_with(
    assembler: &RecipeAssembler,
    ingredients: &[Ingredient],
    target: &NutrientTarget,
    renderer: &dyn RecipeRenderer,
) -> Result<Recipe> {
    let mut recipe = assembler.assemble(ingredients, target)?;

    let narrative = renderer
        .render(&recipe.ingredients, target)
        .await
        .map_err(|e| {
            warn!("Renderer '{}' failed: {}", renderer.renderer_name(), e);
            match e {
                RecipeError::Render(_) => e,
                other => RecipeError::Render(other.to_string()),
            }
        })?;

    recipe.narrative = Some(narrative);
    Ok(recipe)
}

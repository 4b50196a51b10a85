use crate::model::{NutrientTarget, PortionedIngredient};

/// The system prompt used for turning portioned ingredients into recipe prose.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_RENDER_PROMPT: &str = include_str!("prompt.txt");

/// The user message: portions, targets and the cuisine hint
pub fn describe_request(ingredients: &[PortionedIngredient], target: &NutrientTarget) -> String {
    let lines: Vec<String> = ingredients
        .iter()
        .map(|p| format!("- {:.0}g {}", p.grams, p.ingredient.name))
        .collect();

    let cuisine = if target.cuisine().is_empty() {
        "Any"
    } else {
        target.cuisine()
    };

    format!(
        "Ingredients:\n{}\n\nTargets: {}g protein, {}g carbs, {}g fat\nDiet: {}\nCuisine: {}",
        lines.join("\n"),
        target.protein(),
        target.carbs(),
        target.fat(),
        target.diet(),
        cuisine
    )
}

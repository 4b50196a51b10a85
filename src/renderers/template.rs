use async_trait::async_trait;

use crate::assembler::{compose_title, prepare_steps};
use crate::error::Result;
use crate::model::{MacroTotals, NutrientTarget, PortionedIngredient};
use crate::renderers::RecipeRenderer;

/// Deterministic renderer built from the same templates as the recipe steps
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn render_text(ingredients: &[PortionedIngredient], target: &NutrientTarget) -> String {
        let mut totals = MacroTotals::default();
        for portion in ingredients {
            totals.add_portion(&portion.ingredient, portion.grams);
        }

        let title = compose_title(&totals, ingredients, target.cuisine());
        let mut text = format!("{}\n\nIngredients\n", title);
        for portion in ingredients {
            text.push_str(&format!("- {:.0}g {}\n", portion.grams, portion.ingredient.name));
        }

        text.push_str("\nInstructions\n");
        for (number, step) in prepare_steps(ingredients, target.cuisine()).iter().enumerate() {
            text.push_str(&format!("{}. {}\n", number + 1, step.text));
        }

        text.push_str(&format!(
            "\nTotals: {:.0}g protein, {:.0}g carbs, {:.0}g fat, {:.0} kcal\n",
            totals.protein, totals.carbs, totals.fat, totals.calories
        ));
        text
    }
}

#[async_trait]
impl RecipeRenderer for TemplateRenderer {
    fn renderer_name(&self) -> &str {
        "template"
    }

    async fn render(
        &self,
        ingredients: &[PortionedIngredient],
        target: &NutrientTarget,
    ) -> Result<String> {
        Ok(Self::render_text(ingredients, target))
    }
}

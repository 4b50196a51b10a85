mod factory;
mod open_ai;
mod prompt;
mod template;

pub use factory::RendererFactory;
pub use open_ai::OpenAIRenderer;
pub use prompt::{describe_request, RECIPE_RENDER_PROMPT};
pub use template::TemplateRenderer;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NutrientTarget, PortionedIngredient};

/// Turns solved portions into free-form recipe text.
///
/// Output is opaque to the engine; it never feeds back into quantities.
#[async_trait]
pub trait RecipeRenderer: Send + Sync {
    /// Get the renderer name (e.g., "template", "openai")
    fn renderer_name(&self) -> &str;

    async fn render(
        &self,
        ingredients: &[PortionedIngredient],
        target: &NutrientTarget,
    ) -> Result<String>;
}

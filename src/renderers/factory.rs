use crate::config::RendererConfig;
use crate::error::{RecipeError, Result};
use crate::renderers::{OpenAIRenderer, RecipeRenderer, TemplateRenderer};

pub struct RendererFactory;

impl RendererFactory {
    /// Create a renderer instance from configuration
    pub fn create(config: &RendererConfig) -> Result<Box<dyn RecipeRenderer>> {
        match config.provider.trim().to_lowercase().as_str() {
            "template" => Ok(Box::new(TemplateRenderer)),
            "openai" => Ok(Box::new(OpenAIRenderer::new(config)?)),
            other => Err(RecipeError::Render(format!("Unknown renderer: {}", other))),
        }
    }

    /// List all available renderer names
    pub fn available_renderers() -> Vec<&'static str> {
        vec!["template", "openai"]
    }
}

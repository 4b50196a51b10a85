use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::RendererConfig;
use crate::error::{RecipeError, Result};
use crate::model::{NutrientTarget, PortionedIngredient};
use crate::renderers::prompt::{describe_request, RECIPE_RENDER_PROMPT};
use crate::renderers::RecipeRenderer;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIRenderer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAIRenderer {
    /// Create a new OpenAI renderer from configuration
    pub fn new(config: &RendererConfig) -> Result<Self> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                RecipeError::Render("OPENAI_API_KEY not found in config or environment".to_string())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = Duration::from_secs(config.timeout);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(OpenAIRenderer {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Result<Self> {
        let defaults = RendererConfig::default();
        let timeout = Duration::from_secs(defaults.timeout);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(OpenAIRenderer {
            client,
            api_key,
            base_url,
            model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl RecipeRenderer for OpenAIRenderer {
    fn renderer_name(&self) -> &str {
        "openai"
    }

    async fn render(
        &self,
        ingredients: &[PortionedIngredient],
        target: &NutrientTarget,
    ) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": RECIPE_RENDER_PROMPT},
                    {"role": "user", "content": describe_request(ingredients, target)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?
            .error_for_status()?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| RecipeError::Render("Failed to extract content from response".to_string()))?
            .to_string();

        Ok(text)
    }
}

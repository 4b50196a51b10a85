use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Main engine configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// JSON catalog file. The embedded catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,
    /// Ranking weights for ingredient search
    #[serde(default)]
    pub selector: SelectorConfig,
    /// Serving range and tolerance for quantity solving
    #[serde(default)]
    pub solver: SolverConfig,
    /// Optional text renderer for recipe prose
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// Weights of the search distance metric
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    #[serde(default = "default_protein_weight")]
    pub protein_weight: f64,
    #[serde(default = "default_carbs_weight")]
    pub carbs_weight: f64,
    #[serde(default = "default_fat_weight")]
    pub fat_weight: f64,
    /// Weight of the calorie-density term, per 100 kcal of difference
    #[serde(default = "default_calorie_weight")]
    pub calorie_weight: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            protein_weight: default_protein_weight(),
            carbs_weight: default_carbs_weight(),
            fat_weight: default_fat_weight(),
            calorie_weight: default_calorie_weight(),
        }
    }
}

/// Per-ingredient serving range and the allowed deviation from target
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    #[serde(default = "default_min_serving_g")]
    pub min_serving_g: f64,
    #[serde(default = "default_max_serving_g")]
    pub max_serving_g: f64,
    /// Allowed deviation as a fraction of each target macro
    #[serde(default = "default_tolerance_fraction")]
    pub tolerance_fraction: f64,
    /// Lower bound on the allowed deviation, in grams
    #[serde(default = "default_tolerance_floor_g")]
    pub tolerance_floor_g: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_serving_g: default_min_serving_g(),
            max_serving_g: default_max_serving_g(),
            tolerance_fraction: default_tolerance_fraction(),
            tolerance_floor_g: default_tolerance_floor_g(),
        }
    }
}

/// Configuration for the recipe text renderer
#[derive(Debug, Deserialize, Clone)]
pub struct RendererConfig {
    /// "template" or "openai"
    #[serde(default = "default_renderer")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            provider: default_renderer(),
            model: default_model(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_protein_weight() -> f64 {
    1.5
}

fn default_carbs_weight() -> f64 {
    1.0
}

fn default_fat_weight() -> f64 {
    1.2
}

fn default_calorie_weight() -> f64 {
    0.25
}

fn default_min_serving_g() -> f64 {
    10.0
}

fn default_max_serving_g() -> f64 {
    400.0
}

fn default_tolerance_fraction() -> f64 {
    0.10
}

fn default_tolerance_floor_g() -> f64 {
    2.0
}

fn default_renderer() -> String {
    "template".to_string()
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    30
}

impl EngineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOOK__ prefix
    /// 2. recipe_book.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOOK__SOLVER__MAX_SERVING_G
    pub fn load() -> Result<Self> {
        let config = load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the selector or solver cannot work with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let s = &self.solver;
        if !(s.min_serving_g >= 0.0 && s.min_serving_g <= s.max_serving_g) {
            return Err(ConfigError::Message(format!(
                "solver.min_serving_g ({}) must be between 0 and max_serving_g ({})",
                s.min_serving_g, s.max_serving_g
            )));
        }
        if !(s.tolerance_fraction >= 0.0 && s.tolerance_floor_g >= 0.0) {
            return Err(ConfigError::Message(
                "solver tolerance values must be non-negative".to_string(),
            ));
        }

        let w = &self.selector;
        let weights = [
            w.protein_weight,
            w.carbs_weight,
            w.fat_weight,
            w.calorie_weight,
        ];
        if weights.iter().any(|weight| !(weight.is_finite() && *weight >= 0.0)) {
            return Err(ConfigError::Message(
                "selector weights must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read `recipe_book.toml` (optional) and `RECIPE_BOOK__*` variables
pub fn load_config() -> std::result::Result<EngineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_book").required(false))
        // Use double underscore for nested: RECIPE_BOOK__RENDERER__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_BOOK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

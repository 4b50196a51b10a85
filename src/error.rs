use thiserror::Error;

use crate::model::MacroTotals;

/// Errors that can occur while selecting ingredients or assembling a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Malformed target: negative macro values or an unknown diet class
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Recipe assembly was called without any ingredients
    #[error("At least one ingredient is required to assemble a recipe")]
    InsufficientIngredients,

    /// No quantity assignment within the serving range meets the tolerance band
    #[error(
        "Cannot reach the target with these ingredients (best: {:.1}g protein, {:.1}g carbs, {:.1}g fat)",
        best.protein,
        best.carbs,
        best.fat
    )]
    UnsatisfiableTarget { best: MacroTotals },

    /// Catalog could not be loaded or a name could not be resolved
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The text renderer failed
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to a renderer failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;

mod shared;

pub use shared::SharedCatalog;

use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{RecipeError, Result};
use crate::model::Ingredient;

/// The built-in ingredient table, per 100g values.
///
/// Loaded from `catalog.json` at compile time so the crate works without
/// any data files on disk.
pub const EMBEDDED_CATALOG: &str = include_str!("catalog.json");

/// The read-only set of ingredients available for selection
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every entry
    pub fn new(ingredients: Vec<Ingredient>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(ingredients.len());

        for (index, ingredient) in ingredients.iter().enumerate() {
            validate(ingredient)?;
            let key = normalize(&ingredient.name);
            if by_name.insert(key, index).is_some() {
                return Err(RecipeError::Catalog(format!(
                    "Duplicate ingredient name: '{}'",
                    ingredient.name
                )));
            }
        }

        debug!("Catalog built with {} ingredients", ingredients.len());
        Ok(Catalog {
            ingredients,
            by_name,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let ingredients: Vec<Ingredient> = serde_json::from_str(json)?;
        Self::new(ingredients)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} ingredients from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Case-insensitive lookup by name
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.by_name
            .get(&normalize(name))
            .map(|&index| &self.ingredients[index])
    }

    /// Resolve a caller's curated name list, keeping the caller's order
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Ingredient>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).cloned().ok_or_else(|| {
                    RecipeError::Catalog(format!("Unknown ingredient: '{}'", name.trim()))
                })
            })
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate(ingredient: &Ingredient) -> Result<()> {
    if ingredient.name.trim().is_empty() {
        return Err(RecipeError::Catalog(
            "Ingredient name cannot be empty".to_string(),
        ));
    }

    let values = [
        ("protein", ingredient.protein),
        ("carbs", ingredient.carbs),
        ("fat", ingredient.fat),
        ("calories", ingredient.calories),
    ];
    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(RecipeError::Catalog(format!(
                "Ingredient '{}' has invalid {}: {}",
                ingredient.name, field, value
            )));
        }
    }

    Ok(())
}

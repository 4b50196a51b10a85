#![allow(dead_code)]

use recipe_book::{Catalog, DietClass, Ingredient};

pub fn ingredient(name: &str, p: f64, c: f64, f: f64, diets: &[DietClass], tags: &[&str]) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        protein: p,
        carbs: c,
        fat: f,
        calories: p * 4.0 + c * 4.0 + f * 9.0,
        diets: diets.to_vec(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// A small mixed catalog with every diet class represented
pub fn mixed_catalog() -> Catalog {
    Catalog::new(vec![
        ingredient("chicken breast", 31.0, 0.0, 3.6, &[DietClass::Omnivore], &["poultry"]),
        ingredient("salmon", 20.0, 0.0, 13.0, &[DietClass::Pescatarian], &["fish"]),
        ingredient("eggs", 13.0, 1.1, 11.0, &[DietClass::Vegetarian], &["egg"]),
        ingredient("tofu", 8.0, 1.9, 4.8, &[DietClass::Vegetarian], &["soy"]),
        ingredient("peanut butter", 25.0, 20.0, 50.0, &[DietClass::Vegan], &["peanuts"]),
        ingredient("lentils", 9.0, 20.0, 0.4, &[DietClass::Vegan], &["legume"]),
        ingredient("brown rice", 2.6, 23.0, 0.9, &[DietClass::Vegan], &[]),
        ingredient("olive oil", 0.0, 0.0, 100.0, &[DietClass::Vegan], &[]),
    ])
    .unwrap()
}

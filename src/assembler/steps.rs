use crate::model::{MacroTotals, PortionedIngredient, Step};

/// Calorie share above which a recipe is named after that macro
pub const HIGH_PROTEIN_SHARE: f64 = 0.35;
pub const HIGH_CARBS_SHARE: f64 = 0.55;
pub const HIGH_FAT_SHARE: f64 = 0.45;

/// Calorie share from protein above which an ingredient is cooked like a protein
const PROTEIN_PREP_SHARE: f64 = 0.30;

/// Finishing instruction for a cuisine hint, matched by keyword
struct CuisineStyle {
    keywords: &'static [&'static str],
    label: &'static str,
    finish: &'static str,
}

const CUISINE_STYLES: &[CuisineStyle] = &[
    CuisineStyle {
        keywords: &["italian"],
        label: "Italian",
        finish: "Toss everything together in a warm pan with garlic, basil and a pinch of chili flakes",
    },
    CuisineStyle {
        keywords: &["mexican", "tex-mex"],
        label: "Mexican",
        finish: "Combine everything in a skillet with cumin, smoked paprika and a squeeze of lime",
    },
    CuisineStyle {
        keywords: &["indian"],
        label: "Indian",
        finish: "Simmer everything together with ginger, cumin, turmeric and garam masala",
    },
    CuisineStyle {
        keywords: &["chinese", "asian"],
        label: "Asian",
        finish: "Stir-fry everything over high heat with garlic, ginger and scallions",
    },
    CuisineStyle {
        keywords: &["japanese"],
        label: "Japanese",
        finish: "Arrange everything in a bowl and finish with sesame seeds and rice vinegar",
    },
    CuisineStyle {
        keywords: &["thai"],
        label: "Thai",
        finish: "Stir-fry everything with lemongrass, lime leaves and fresh basil",
    },
    CuisineStyle {
        keywords: &["mediterranean", "greek"],
        label: "Mediterranean",
        finish: "Combine everything with lemon juice, oregano and black pepper",
    },
];

const DEFAULT_FINISH: &str = "Combine everything in a large pan, season with salt and pepper";

fn cuisine_style(cuisine: &str) -> Option<&'static CuisineStyle> {
    let cuisine = cuisine.to_lowercase();
    CUISINE_STYLES
        .iter()
        .find(|style| style.keywords.iter().any(|k| cuisine.contains(*k)))
}

/// Display label for a cuisine hint: a known style's label, otherwise the
/// hint in title case. Empty when there is no hint.
pub fn cuisine_label(cuisine: &str) -> String {
    match cuisine_style(cuisine) {
        Some(style) => style.label.to_string(),
        None => title_case(cuisine),
    }
}

/// One preparation step per ingredient, then a cooking step and a serving step
pub fn prepare_steps(portions: &[PortionedIngredient], cuisine: &str) -> Vec<Step> {
    let mut steps: Vec<Step> = portions
        .iter()
        .map(|portion| Step {
            text: prep_text(portion),
            ingredient: Some(portion.ingredient.name.clone()),
            grams: Some(portion.grams),
        })
        .collect();

    let names = join_names(portions);
    let finish = match cuisine_style(cuisine) {
        Some(style) => format!("{}: {}.", style.finish, names),
        None if !cuisine.trim().is_empty() => format!(
            "{} in the {} style: {}.",
            DEFAULT_FINISH,
            cuisine.trim(),
            names
        ),
        None => format!("{}: {}.", DEFAULT_FINISH, names),
    };
    steps.push(Step {
        text: finish,
        ingredient: None,
        grams: None,
    });

    steps.push(Step {
        text: "Taste, adjust the seasoning and serve immediately.".to_string(),
        ingredient: None,
        grams: None,
    });

    steps
}

fn prep_text(portion: &PortionedIngredient) -> String {
    let name = &portion.ingredient.name;
    let grams = portion.grams;
    let (p, c, f) = MacroTotals::from_grams(
        portion.ingredient.protein,
        portion.ingredient.carbs,
        portion.ingredient.fat,
    )
    .calorie_shares();

    if p == 0.0 && c == 0.0 && f == 0.0 {
        format!("Prepare {:.0}g of {}.", grams, name)
    } else if p >= PROTEIN_PREP_SHARE {
        format!("Season {:.0}g of {} and cook until done through.", grams, name)
    } else if c >= f {
        format!("Cook {:.0}g of {} until tender.", grams, name)
    } else {
        format!("Measure out {:.0}g of {}.", grams, name)
    }
}

fn join_names(portions: &[PortionedIngredient]) -> String {
    let names: Vec<&str> = portions
        .iter()
        .map(|p| p.ingredient.name.as_str())
        .collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Title from the dominant macro, the cuisine hint and the main ingredient
pub fn compose_title(totals: &MacroTotals, portions: &[PortionedIngredient], cuisine: &str) -> String {
    let (p, c, f) = totals.calorie_shares();
    let prefix = if p > HIGH_PROTEIN_SHARE {
        "High-Protein"
    } else if c > HIGH_CARBS_SHARE {
        "Hearty"
    } else if f > HIGH_FAT_SHARE {
        "Rich"
    } else {
        "Balanced"
    };

    // The ingredient contributing the most calories; ties go to the earlier one
    let main = portions
        .iter()
        .map(|portion| (portion, portion.macros().calories))
        .fold(None::<(&PortionedIngredient, f64)>, |best, (portion, kcal)| match best {
            Some((_, best_kcal)) if best_kcal >= kcal => best,
            _ => Some((portion, kcal)),
        })
        .map(|(portion, _)| title_case(&portion.ingredient.name));

    let mut parts = vec![prefix.to_string()];
    let label = cuisine_label(cuisine);
    if !label.is_empty() {
        parts.push(label);
    }
    if let Some(main) = main {
        parts.push(main);
    }
    parts.push("Bowl".to_string());
    parts.join(" ")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn portion(name: &str, p: f64, c: f64, f: f64, grams: f64) -> PortionedIngredient {
        PortionedIngredient {
            ingredient: Ingredient {
                name: name.to_string(),
                protein: p,
                carbs: c,
                fat: f,
                calories: p * 4.0 + c * 4.0 + f * 9.0,
                diets: vec![],
                tags: vec![],
            },
            grams,
        }
    }

    fn bowl() -> Vec<PortionedIngredient> {
        vec![
            portion("chicken breast", 31.0, 0.0, 3.6, 150.0),
            portion("brown rice", 2.6, 23.0, 0.9, 200.0),
            portion("olive oil", 0.0, 0.0, 100.0, 10.0),
        ]
    }

    #[test]
    fn test_one_step_per_ingredient_then_finish() {
        let steps = prepare_steps(&bowl(), "Italian");
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].ingredient.as_deref(), Some("chicken breast"));
        assert_eq!(steps[0].grams, Some(150.0));
        assert!(steps[0].text.contains("150g of chicken breast"));
        assert!(steps[1].text.starts_with("Cook 200g of brown rice"));
        assert!(steps[2].text.starts_with("Measure out 10g of olive oil"));
        assert!(steps[3].text.contains("basil"));
        assert!(steps[3].text.contains("chicken breast, brown rice and olive oil"));
        assert!(steps[3].ingredient.is_none());
    }

    #[test]
    fn test_unknown_cuisine_is_echoed() {
        let steps = prepare_steps(&bowl(), "Peruvian");
        assert!(steps[3].text.contains("in the Peruvian style"));
    }

    #[test]
    fn test_no_cuisine_uses_default_finish() {
        let steps = prepare_steps(&bowl(), "");
        assert!(steps[3].text.starts_with(DEFAULT_FINISH));
        assert!(!steps[3].text.contains("style"));
    }

    #[test]
    fn test_title_high_protein() {
        let totals = MacroTotals::from_grams(50.0, 20.0, 5.0);
        let title = compose_title(&totals, &bowl(), "indian");
        assert_eq!(title, "High-Protein Indian Chicken Breast Bowl");
    }

    #[test]
    fn test_title_variants() {
        assert!(compose_title(&MacroTotals::from_grams(5.0, 80.0, 2.0), &[], "").starts_with("Hearty"));
        assert!(compose_title(&MacroTotals::from_grams(5.0, 10.0, 30.0), &[], "").starts_with("Rich"));
        assert_eq!(
            compose_title(&MacroTotals::from_grams(20.0, 40.0, 15.0), &[], "street food"),
            "Balanced Street Food Bowl"
        );
        assert_eq!(compose_title(&MacroTotals::default(), &[], ""), "Balanced Bowl");
    }

    #[test]
    fn test_join_names() {
        let portions = bowl();
        assert_eq!(join_names(&portions[..1]), "chicken breast");
        assert_eq!(join_names(&portions[..2]), "chicken breast and brown rice");
    }
}

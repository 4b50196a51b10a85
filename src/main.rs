use log::{debug, error};
use std::env;

use recipe_book::{EngineConfig, NutrientTarget, RecipeBook, TargetRequest};

const USAGE: &str = "Usage:
  recipe-book search <request.json>
  recipe-book recipe <request.json> <ingredient,ingredient,...>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;
    let request_path = args.get(2).ok_or(USAGE)?;

    let request: TargetRequest = serde_json::from_str(&std::fs::read_to_string(request_path)?)?;
    let target = NutrientTarget::try_from(request)?;
    debug!("{:#?}", target);

    let config = EngineConfig::load()?;
    let book = RecipeBook::from_config(&config)?;

    match command.as_str() {
        "search" => {
            let result = book.search(&target);
            println!("{}", serde_json::to_string_pretty(&result.summaries())?);
        }
        "recipe" => {
            let names: Vec<&str> = args
                .get(3)
                .ok_or(USAGE)?
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect();
            let ingredients = book.catalog().snapshot().resolve(&names)?;
            let recipe = book.generate_with_narrative(&ingredients, &target).await?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        other => {
            error!("Unknown command: {}", other);
            return Err(USAGE.into());
        }
    }

    Ok(())
}

use std::env;
use std::sync::Arc;

use recipe_scout::{
    ApiClient, Favorites, JsonFileStore, ProgressObserver, RandomRecipeLoader, Recipe,
    RecipeSummary, RunCounter, ScoutConfig, ScoutError,
};

struct CountPrinter;

impl ProgressObserver for CountPrinter {
    fn on_progress(&self, recipes: &[RecipeSummary]) {
        println!("... {} recipes so far", recipes.len());
    }
}

fn print_summary(recipe: &RecipeSummary) {
    match &recipe.category {
        Some(category) => println!("{}  {} ({})", recipe.id, recipe.name, category),
        None => println!("{}  {}", recipe.id, recipe.name),
    }
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.name);
    if let Some(category) = &recipe.category {
        println!("Category: {}", category);
    }
    if let Some(area) = &recipe.area {
        println!("Cuisine: {}", area);
    }
    println!("\nIngredients:");
    for item in recipe.ingredients() {
        println!("  {} {}", item.measure, item.name);
    }
    println!("\nInstructions:");
    for paragraph in recipe.instruction_paragraphs() {
        println!("  {}", paragraph);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ScoutConfig::load()?;
    let client = ApiClient::new(&config.api);
    let favorites = Favorites::new(JsonFileStore::new(&config.favorites.path));

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).ok_or(USAGE)?;

    match command {
        "search" => {
            let term = args.get(2).ok_or("Usage: recipe-scout search <term>")?;
            for recipe in client.search(term).await? {
                print_summary(&recipe.summary());
            }
        }
        "lookup" => {
            let id = args.get(2).ok_or("Usage: recipe-scout lookup <id>")?;
            let recipe = client
                .lookup(id)
                .await?
                .ok_or_else(|| ScoutError::NotFound(id.to_string()))?;
            print_recipe(&recipe);
        }
        "category" => {
            let name = args.get(2).ok_or("Usage: recipe-scout category <name>")?;
            let recipes = client.filter_by_category(name).await?;
            println!("{} recipes in {}", recipes.len(), name);
            for recipe in &recipes {
                print_summary(recipe);
            }
        }
        "random" => {
            let loader = RandomRecipeLoader::new(Arc::new(client), config.loader)?
                .with_observer(Box::new(CountPrinter));
            let counter = RunCounter::new();
            for recipe in loader.run(&counter.begin()).await? {
                print_summary(&recipe);
            }
        }
        "favorites" => {
            let action = args.get(2).map(String::as_str).unwrap_or("list");
            match action {
                "list" => {
                    let list = favorites.list().await?;
                    if list.is_empty() {
                        println!("No favorite recipes yet.");
                    } else {
                        println!("{} favorite recipes", list.len());
                        for recipe in &list {
                            print_summary(&recipe.summary());
                        }
                    }
                }
                "add" | "toggle" => {
                    let id = args
                        .get(3)
                        .ok_or("Usage: recipe-scout favorites add|toggle <id>")?;
                    let recipe = client
                        .lookup(id)
                        .await?
                        .ok_or_else(|| ScoutError::NotFound(id.to_string()))?;
                    let name = recipe.name.clone();
                    let favorited = if action == "add" {
                        favorites.add(recipe).await?;
                        true
                    } else {
                        favorites.toggle(recipe).await?
                    };
                    if favorited {
                        println!("Added {} to favorites", name);
                    } else {
                        println!("Removed {} from favorites", name);
                    }
                }
                "remove" => {
                    let id = args
                        .get(3)
                        .ok_or("Usage: recipe-scout favorites remove <id>")?;
                    if favorites.remove(id).await? {
                        println!("Removed {} from favorites", id);
                    } else {
                        println!("{} was not in favorites", id);
                    }
                }
                _ => return Err(USAGE.into()),
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

const USAGE: &str = "Usage: recipe-scout <search <term> | lookup <id> | category <name> | random | favorites [list|add <id>|remove <id>|toggle <id>]>";

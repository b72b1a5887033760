pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod loader;
pub mod model;

use std::sync::Arc;

pub use client::ApiClient;
pub use config::{ApiConfig, FavoritesConfig, LoaderConfig, ScoutConfig};
pub use error::ScoutError;
pub use favorites::{Favorites, FavoritesStore, JsonFileStore};
pub use loader::{ProgressObserver, RandomRecipeLoader, RecipeSource, RunCounter, RunTicket};
pub use model::{Ingredient, Recipe, RecipeSummary};

/// Search recipes by keyword using the ambient configuration.
pub async fn search_recipes(term: &str) -> Result<Vec<Recipe>, ScoutError> {
    let config = ScoutConfig::load()?;
    let client = ApiClient::new(&config.api);
    client.search(term).await
}

/// Look up one recipe by id, erroring when the id matches nothing.
pub async fn lookup_recipe(id: &str) -> Result<Recipe, ScoutError> {
    let config = ScoutConfig::load()?;
    let client = ApiClient::new(&config.api);
    client
        .lookup(id)
        .await?
        .ok_or_else(|| ScoutError::NotFound(id.to_string()))
}

/// Load a front page worth of random recipes: batched concurrent
/// fetches, deduplicated by id, with a keyword-search fallback when
/// the batches produce nothing.
pub async fn load_random_recipes() -> Result<Vec<RecipeSummary>, ScoutError> {
    let config = ScoutConfig::load()?;
    let client = Arc::new(ApiClient::new(&config.api));
    let loader = RandomRecipeLoader::new(client, config.loader)?;
    let counter = RunCounter::new();
    loader.run(&counter.begin()).await
}

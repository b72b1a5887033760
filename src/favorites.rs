use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use crate::error::ScoutError;
use crate::model::Recipe;

/// Key-value slot holding the whole favorites list as one JSON blob.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Recipe>, ScoutError>;
    async fn save(&self, recipes: &[Recipe]) -> Result<(), ScoutError>;
}

/// File-backed store. A missing file reads as an empty list; a corrupt
/// blob is an error rather than silent data loss.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FavoritesStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Recipe>, ScoutError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, recipes: &[Recipe]) -> Result<(), ScoutError> {
        let blob = serde_json::to_vec(recipes)?;
        fs::write(&self.path, blob).await?;
        Ok(())
    }
}

/// Favorites list over an injected store. Recipes are keyed by id and
/// kept in insertion order.
pub struct Favorites<S> {
    store: S,
}

impl<S: FavoritesStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, ScoutError> {
        self.store.load().await
    }

    pub async fn contains(&self, id: &str) -> Result<bool, ScoutError> {
        Ok(self.store.load().await?.iter().any(|r| r.id == id))
    }

    /// Add a recipe. Adding an id that is already present is a no-op.
    pub async fn add(&self, recipe: Recipe) -> Result<(), ScoutError> {
        let mut favorites = self.store.load().await?;
        if favorites.iter().any(|r| r.id == recipe.id) {
            debug!("Recipe {} already favorited", recipe.id);
            return Ok(());
        }
        favorites.push(recipe);
        self.store.save(&favorites).await
    }

    /// Remove by id. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> Result<bool, ScoutError> {
        let mut favorites = self.store.load().await?;
        let before = favorites.len();
        favorites.retain(|r| r.id != id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.store.save(&favorites).await?;
        Ok(true)
    }

    /// Flip membership. Returns whether the recipe is a favorite afterwards.
    pub async fn toggle(&self, recipe: Recipe) -> Result<bool, ScoutError> {
        if self.remove(&recipe.id).await? {
            Ok(false)
        } else {
            self.add(recipe).await?;
            Ok(true)
        }
    }
}

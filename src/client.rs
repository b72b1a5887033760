use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;

use crate::config::ApiConfig;
use crate::error::ScoutError;
use crate::loader::RecipeSource;
use crate::model::{Recipe, RecipeSummary};

/// Every endpoint wraps its rows in a `meals` array; a `null` array
/// means no matches.
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// Client for the recipe API.
///
/// Network-level failures and 5xx responses are retried once after a
/// fixed delay, re-issuing the identical request; 4xx responses are
/// returned as-is.
pub struct ApiClient {
    client: Client,
    base_url: String,
    retry_delay: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("recipe-scout/0.3")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Search full recipe records by keyword.
    pub async fn search(&self, term: &str) -> Result<Vec<Recipe>, ScoutError> {
        self.get_meals("/search.php", &[("s", term)]).await
    }

    /// Look up one recipe by id. `None` when the id matches nothing.
    pub async fn lookup(&self, id: &str) -> Result<Option<Recipe>, ScoutError> {
        let meals: Vec<Recipe> = self.get_meals("/lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    /// List the summaries belonging to a category. Filter rows carry
    /// only id, name and thumbnail.
    pub async fn filter_by_category(&self, name: &str) -> Result<Vec<RecipeSummary>, ScoutError> {
        self.get_meals("/filter.php", &[("c", name)]).await
    }

    /// Fetch one random recipe. The endpoint returns a one-element
    /// `meals` list per call.
    pub async fn random(&self) -> Result<Recipe, ScoutError> {
        let meals: Vec<Recipe> = self.get_meals("/random.php", &[]).await?;
        meals.into_iter().next().ok_or_else(|| {
            ScoutError::MalformedPayload("random endpoint returned no recipe".to_string())
        })
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ScoutError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.send_with_retry(&url, query).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Api {
                status: status.as_u16(),
            });
        }

        let envelope: MealsEnvelope<T> = response.json().await?;
        let meals = envelope.meals.unwrap_or_default();
        debug!("GET {} returned {} meals", path, meals.len());
        Ok(meals)
    }

    /// Issue the request, retrying once after `retry_delay` on a
    /// network-level error or a 5xx response.
    async fn send_with_retry(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, ScoutError> {
        match self.client.get(url).query(query).send().await {
            Ok(response) if !response.status().is_server_error() => return Ok(response),
            Ok(response) => {
                warn!(
                    "GET {} returned {}, retrying once after {:?}",
                    url,
                    response.status(),
                    self.retry_delay
                );
            }
            Err(e) => {
                warn!(
                    "GET {} failed ({}), retrying once after {:?}",
                    url, e, self.retry_delay
                );
            }
        }

        sleep(self.retry_delay).await;
        Ok(self.client.get(url).query(query).send().await?)
    }
}

#[async_trait]
impl RecipeSource for ApiClient {
    async fn fetch_one(&self) -> Result<RecipeSummary, ScoutError> {
        Ok(self.random().await?.summary())
    }

    async fn search(&self, term: &str) -> Result<Vec<RecipeSummary>, ScoutError> {
        let meals = ApiClient::search(self, term).await?;
        Ok(meals.iter().map(Recipe::summary).collect())
    }
}

use thiserror::Error;

/// Errors that can occur while talking to the recipe API or the
/// favorites store
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Transport-level failure after the client's automatic retry
    #[error("Failed to reach recipe API: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status after the client's automatic retry
    #[error("Recipe API returned status {status}")]
    Api { status: u16 },

    /// Response body was present but not usable
    #[error("Malformed API payload: {0}")]
    MalformedPayload(String),

    /// Lookup by id matched no recipe
    #[error("No recipe found for id {0}")]
    NotFound(String),

    /// Random loading produced nothing and the fallback search also
    /// came up empty
    #[error("Unable to load recipes")]
    Exhausted,

    /// A newer loader run replaced this one before it finished
    #[error("Loader run superseded by a newer run")]
    Superseded,

    /// Failed to read or write the favorites file
    #[error("Favorites store error: {0}")]
    Store(#[from] std::io::Error),

    /// Failed to encode or decode the favorites blob
    #[error("Favorites serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

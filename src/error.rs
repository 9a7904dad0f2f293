use thiserror::Error;

/// Errors that can occur while generating, saving or planning recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// HTTP request to a remote service failed
    #[error("Request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Text generation provider returned an error or an unusable response
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Record store rejected or failed an operation
    #[error("Store error: {0}")]
    StoreError(String),

    /// Authentication provider rejected the credentials or failed
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// An operation requires a signed-in user
    #[error("No user is signed in")]
    NotAuthenticated,

    /// Caller supplied input that cannot be used
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to (de)serialize a record or payload
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to read or write a local file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

//! Error types for the reaction translator

use thiserror::Error;

/// Result type alias for translator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while bridging reactions to translations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Fetching the reacted-to message and its thread failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Translation provider rejected or failed the request
    #[error("translation error: {0}")]
    Translation(String),

    /// Posting the translated reply failed
    #[error("post error: {0}")]
    Post(String),

    /// Google credential discovery or token exchange failed
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

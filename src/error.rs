//! Error types for the Aletheia harness

use thiserror::Error;

/// Main error type for Aletheia operations.
///
/// A failed login and a network failure are both fatal for the test case
/// that hit them, but they stay distinct conditions: neither is ever folded
/// into a "not vulnerable" verdict.
#[derive(Debug, Error)]
pub enum AletheiaError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Aletheia operations
pub type Result<T> = std::result::Result<T, AletheiaError>;

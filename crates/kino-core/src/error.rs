//! Error types for kino-core

use thiserror::Error;

/// Main error type for kino-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned no candidate text")]
    EmptyResponse,

    #[error("Chat platform error: {0}")]
    Platform(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for kino-core
pub type Result<T> = std::result::Result<T, Error>;

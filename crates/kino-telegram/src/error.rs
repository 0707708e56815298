//! Error types for kino-telegram

use thiserror::Error;

/// kino-telegram error type
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram token not set")]
    TokenNotSet,

    #[error("Teloxide error: {0}")]
    Teloxide(#[from] teloxide::ApiError),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Update conversion error: {0}")]
    Convert(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] kino_core::Error),
}

impl From<teloxide::RequestError> for TelegramError {
    fn from(err: teloxide::RequestError) -> Self {
        match err {
            teloxide::RequestError::Api(api_err) => TelegramError::Teloxide(api_err),
            _ => TelegramError::Request(err.to_string()),
        }
    }
}

impl From<TelegramError> for kino_core::Error {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Core(e) => e,
            other => kino_core::Error::Platform(other.to_string()),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TelegramError>;

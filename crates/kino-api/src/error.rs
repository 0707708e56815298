//! エラー型定義 (kino-api)

use thiserror::Error;

/// kino-api のエラー型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;

//! エラー型定義 (kino-schedule)

use thiserror::Error;

/// kino-schedule のエラー型
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("無効な間隔: {min}〜{max} 時間")]
    InvalidRange { min: u64, max: u64 },
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ScheduleError>;

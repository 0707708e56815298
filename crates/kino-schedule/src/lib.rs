//! アンビエントメッセージ送信モジュール
//!
//! 5〜10 時間ごとのランダムな間隔で、最後に見たチャットへ
//! AI が生成したメッセージを送信します。

mod delay;
mod error;
mod scheduler;

pub use delay::{DelaySource, FixedDelay, RandomHours};
pub use error::{Result, ScheduleError};
pub use scheduler::{AmbientScheduler, FireOutcome, SchedulerHandle};

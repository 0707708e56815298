//! kino-core: core library for kino-bot
//!
//! Gemini 呼び出し、プロンプト生成、リアクション選択、メッセージ分類など、
//! チャットプラットフォームに依存しないロジックを提供します。

pub mod classify;
pub mod config;
pub mod error;
pub mod llm;
pub mod platform;
pub mod prompt;
pub mod reaction;
pub mod session;
pub mod update;

pub use classify::{Classifier, ContentType, content_type, reply_origin};
pub use config::{AmbientConfig, ApiConfig, Config, LlmConfig, TelegramConfig, TriggerConfig};
pub use error::{Error, Result};
pub use llm::{GeminiClient, PLACEHOLDER_REPLY, TextGenerator, generate_or_placeholder};
pub use platform::ChatPlatform;
pub use session::SessionState;
pub use update::{Attachments, ChatRef, ChatUpdate, IncomingMessage, Sender};

//! kino-telegram: Telegram front end for kino-bot
//!
//! teloxide の型はこのクレートの中だけで扱い、受信したアップデートは
//! `kino_core::ChatUpdate` に変換してから `EventHandler` に渡します。

pub mod bot;
pub mod convert;
pub mod error;
pub mod handler;
pub mod platform;

pub use bot::{BotIdentity, KinoBot};
pub use error::{Result, TelegramError};
pub use handler::{EventHandler, GREETING};
pub use platform::TelegramPlatform;

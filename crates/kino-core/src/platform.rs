//! Outbound chat-platform operations

use async_trait::async_trait;

use crate::error::Result;

/// The calls the bot makes against the chat platform
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send plain text to a chat
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Send text as a reply to `reply_to`, rendered with the Markdown hint
    async fn send_reply(&self, chat_id: i64, text: &str, reply_to: i32) -> Result<()>;

    /// Set a single emoji reaction on a message
    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> Result<()>;

    /// Plain-emoji reactions the chat currently permits.
    ///
    /// An empty list means the chat reported none usable.
    async fn reaction_palette(&self, chat_id: i64) -> Result<Vec<String>>;
}

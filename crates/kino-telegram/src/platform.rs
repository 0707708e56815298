//! `ChatPlatform` on top of the Telegram Bot API

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ReactionType, ReplyParameters};
use tracing::debug;

use kino_core::ChatPlatform;

use crate::error::TelegramError;

/// Telegram implementation of the outbound chat calls
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn send_message(&self, chat_id: i64, text: &str) -> kino_core::Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(TelegramError::from)?;
        Ok(())
    }

    #[allow(deprecated)]
    async fn send_reply(&self, chat_id: i64, text: &str, reply_to: i32) -> kino_core::Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Markdown)
            .reply_parameters(ReplyParameters::new(MessageId(reply_to)))
            .await
            .map_err(TelegramError::from)?;
        Ok(())
    }

    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> kino_core::Result<()> {
        self.bot
            .set_message_reaction(ChatId(chat_id), MessageId(message_id))
            .reaction(vec![ReactionType::Emoji {
                emoji: emoji.to_string(),
            }])
            .await
            .map_err(TelegramError::from)?;
        debug!(chat_id, message_id, emoji, "Reaction set");
        Ok(())
    }

    async fn reaction_palette(&self, chat_id: i64) -> kino_core::Result<Vec<String>> {
        let chat = self
            .bot
            .get_chat(ChatId(chat_id))
            .await
            .map_err(TelegramError::from)?;
        let value = serde_json::to_value(&chat).map_err(TelegramError::from)?;
        Ok(palette_from_chat(&value))
    }
}

/// Plain emoji from a chat's `available_reactions`; custom emoji are skipped.
///
/// A missing field means the chat allows every standard reaction, which the
/// caller handles by falling back to the default palette.
pub fn palette_from_chat(chat: &serde_json::Value) -> Vec<String> {
    chat.get("available_reactions")
        .and_then(|v| v.as_array())
        .map(|reactions| {
            reactions
                .iter()
                .filter(|r| r.get("type").and_then(|t| t.as_str()) == Some("emoji"))
                .filter_map(|r| r.get("emoji").and_then(|e| e.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_palette_plain_emoji_only() {
        let chat = json!({
            "id": -100,
            "type": "channel",
            "available_reactions": [
                {"type": "emoji", "emoji": "🔥"},
                {"type": "custom_emoji", "custom_emoji_id": "5368324170671202286"},
                {"type": "emoji", "emoji": "👍"},
                {"type": "paid"}
            ]
        });
        assert_eq!(palette_from_chat(&chat), vec!["🔥", "👍"]);
    }

    #[test]
    fn test_palette_missing_field() {
        assert!(palette_from_chat(&json!({"id": 1, "type": "group"})).is_empty());
        assert!(palette_from_chat(&json!({"available_reactions": null})).is_empty());
    }

    #[test]
    fn test_palette_only_custom() {
        let chat = json!({
            "available_reactions": [{"type": "custom_emoji", "custom_emoji_id": "1"}]
        });
        assert!(palette_from_chat(&chat).is_empty());
    }
}

//! teloxide → kino-core update conversion

use kino_core::{ChatUpdate, IncomingMessage};
use teloxide::types::Message;

use crate::error::Result;

/// Convert a teloxide message into the core message model
pub fn incoming(msg: &Message) -> Result<IncomingMessage> {
    let value = serde_json::to_value(msg)?;
    Ok(IncomingMessage::from_json(value)?)
}

/// `/start` command
pub fn start(msg: &Message) -> Result<ChatUpdate> {
    incoming(msg).map(ChatUpdate::Start)
}

/// Message in a private chat or group
pub fn message(msg: &Message) -> Result<ChatUpdate> {
    incoming(msg).map(ChatUpdate::Message)
}

/// Channel post
pub fn channel_post(msg: &Message) -> Result<ChatUpdate> {
    incoming(msg).map(ChatUpdate::ChannelPost)
}

//! Inbound update model
//!
//! Updates are built once at the platform boundary from Bot API JSON and
//! carry only what the bot looks at.

use serde::{Deserialize, Deserializer, Serialize};

/// An inbound chat event
#[derive(Debug, Clone)]
pub enum ChatUpdate {
    /// `/start` command
    Start(IncomingMessage),
    /// Message in a private chat or group
    Message(IncomingMessage),
    /// Post in a channel
    ChannelPost(IncomingMessage),
    /// Someone reacted to a message
    Reaction { chat_id: i64, message_id: i32 },
}

/// Chat a message belongs to, or the anonymous channel identity it was sent as
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRef {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A user who sent a message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl Sender {
    /// Username if set, otherwise first name
    pub fn handle(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.first_name)
    }
}

/// A message or channel post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(deserialize_with = "message_id")]
    pub message_id: i32,
    pub chat: ChatRef,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub sender_chat: Option<ChatRef>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub attachments: Attachments,
    #[serde(default)]
    pub reply_to_message: Option<Box<IncomingMessage>>,
}

/// Presence markers for non-text payloads
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct Attachments {
    #[serde(default, deserialize_with = "present")]
    pub photo: bool,
    #[serde(default, deserialize_with = "present")]
    pub video: bool,
    #[serde(default, deserialize_with = "present")]
    pub audio: bool,
    #[serde(default, deserialize_with = "present")]
    pub voice: bool,
    #[serde(default, deserialize_with = "present")]
    pub document: bool,
    #[serde(default, deserialize_with = "present")]
    pub animation: bool,
    #[serde(default, deserialize_with = "present")]
    pub poll: bool,
    #[serde(default, deserialize_with = "present")]
    pub sticker: bool,
    #[serde(default, deserialize_with = "present")]
    pub contact: bool,
    #[serde(default, deserialize_with = "present")]
    pub venue: bool,
    #[serde(default, deserialize_with = "present")]
    pub location: bool,
}

fn present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde::de::IgnoredAny>::deserialize(deserializer).map(|v| v.is_some())
}

/// Accepts both `42` and `{"message_id": 42}`
fn message_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Plain(i32),
        Wrapped { message_id: i32 },
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Plain(id) | Repr::Wrapped { message_id: id } => id,
    })
}

impl IncomingMessage {
    /// Parse a Bot API message object.
    ///
    /// The replied-to message is kept one level deep.
    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        let mut message: Self = serde_json::from_value(value)?;
        if let Some(replied) = message.reply_to_message.as_mut() {
            replied.reply_to_message = None;
        }
        Ok(message)
    }

    /// Text, or caption when there is no text
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or(self.caption.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    /// Whether the message was posted by the given user id
    pub fn is_from(&self, user_id: i64) -> bool {
        self.from.as_ref().is_some_and(|u| u.id == user_id)
    }
}

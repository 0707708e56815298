//! Message classification: reply-worthiness, reply origin and content type

use regex::Regex;
use std::fmt;

use crate::config::TriggerConfig;
use crate::error::{Error, Result};
use crate::update::IncomingMessage;

/// What kind of payload a post carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Photo,
    Video,
    Audio,
    Voice,
    Document,
    Animation,
    Poll,
    Sticker,
    Contact,
    Venue,
    Location,
    Text,
    Caption,
    Unknown,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Voice => "voice",
            Self::Document => "document",
            Self::Animation => "animation",
            Self::Poll => "poll",
            Self::Sticker => "sticker",
            Self::Contact => "contact",
            Self::Venue => "venue",
            Self::Location => "location",
            Self::Text => "text",
            Self::Caption => "caption",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content type of a message. First match in fixed priority order wins.
pub fn content_type(msg: &IncomingMessage) -> ContentType {
    let a = &msg.attachments;
    let checks = [
        (a.photo, ContentType::Photo),
        (a.video, ContentType::Video),
        (a.audio, ContentType::Audio),
        (a.voice, ContentType::Voice),
        (a.document, ContentType::Document),
        (a.animation, ContentType::Animation),
        (a.poll, ContentType::Poll),
        (a.sticker, ContentType::Sticker),
        (a.contact, ContentType::Contact),
        (a.venue, ContentType::Venue),
        (a.location, ContentType::Location),
        (msg.text.is_some(), ContentType::Text),
        (msg.caption.is_some(), ContentType::Caption),
    ];

    checks
        .into_iter()
        .find_map(|(present, kind)| present.then_some(kind))
        .unwrap_or(ContentType::Unknown)
}

/// Display name of whoever posted the message `msg` replies to.
///
/// A channel identity wins over `from`, since Telegram fills `from` with a
/// placeholder user for posts sent on behalf of a channel.
pub fn reply_origin(msg: &IncomingMessage) -> Option<String> {
    let replied = msg.reply_to_message.as_deref()?;

    if let Some(channel) = &replied.sender_chat {
        return channel.title.clone().or_else(|| channel.username.clone());
    }

    replied.from.as_ref().map(|u| u.handle().to_string())
}

/// Decides which messages get a generated reply
#[derive(Debug, Clone)]
pub struct Classifier {
    bot_id: i64,
    mention: Option<Regex>,
    triggers: TriggerConfig,
}

impl Classifier {
    /// Create a classifier for the bot with the given id and username (without `@`)
    pub fn new(bot_id: i64, bot_username: &str, triggers: TriggerConfig) -> Result<Self> {
        let username = bot_username.trim().trim_start_matches('@');
        let mention = if username.is_empty() {
            None
        } else {
            let pattern = format!("(?i)@{}", regex::escape(username));
            Some(Regex::new(&pattern).map_err(|e| Error::Config(e.to_string()))?)
        };

        Ok(Self {
            bot_id,
            mention,
            triggers,
        })
    }

    /// Whether `text` mentions the bot (case-insensitive)
    pub fn mentions_bot(&self, text: &str) -> bool {
        self.mention.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Remove every mention of the bot from `text`
    pub fn strip_mention(&self, text: &str) -> String {
        match &self.mention {
            Some(re) => re.replace_all(text, "").trim().to_string(),
            None => text.trim().to_string(),
        }
    }

    /// Whether the message should get a generated reply
    pub fn is_reply_worthy(&self, msg: &IncomingMessage) -> bool {
        let Some(text) = msg.text_or_caption() else {
            return false;
        };

        if msg.from.as_ref().is_some_and(|u| u.id == self.bot_id) {
            return false;
        }

        let is_tracked_reply = msg
            .reply_to_message
            .as_deref()
            .is_some_and(|replied| self.triggers.reply_to_any || replied.is_from(self.bot_id));

        is_tracked_reply
            || (self.triggers.on_mention && self.mentions_bot(text))
            || (self.triggers.on_question && text.contains('?'))
    }
}

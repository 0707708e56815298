//! Inbound event handling
//!
//! Replies always go out before reactions, and each outbound call is
//! best-effort: a failure is logged and the next step still runs.

use std::sync::Arc;

use tracing::{debug, info, warn};

use kino_core::prompt::{build_prompt, reply_context};
use kino_core::reaction::{DEFAULT_REACTIONS, SAFE_REACTIONS, choose_reaction, to_owned_list};
use kino_core::{
    ChatPlatform, ChatUpdate, Classifier, ContentType, IncomingMessage, SessionState,
    TextGenerator, content_type, generate_or_placeholder, reply_origin,
};

/// Reply to `/start`
pub const GREETING: &str = "🤖 Heyy, wanna talk with me?";

/// Routes chat updates to prompt building, generation, replies and reactions
pub struct EventHandler {
    platform: Arc<dyn ChatPlatform>,
    generator: Arc<dyn TextGenerator>,
    classifier: Classifier,
    session: SessionState,
    react_to_messages: bool,
}

impl EventHandler {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        generator: Arc<dyn TextGenerator>,
        classifier: Classifier,
        session: SessionState,
    ) -> Self {
        Self {
            platform,
            generator,
            classifier,
            session,
            react_to_messages: true,
        }
    }

    /// Whether replied-to messages also get an emoji reaction
    pub fn with_message_reactions(mut self, enabled: bool) -> Self {
        self.react_to_messages = enabled;
        self
    }

    /// Session shared with the ambient scheduler
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Handle one update to completion
    pub async fn handle(&self, update: ChatUpdate) {
        match update {
            ChatUpdate::Start(msg) => self.on_start(msg).await,
            ChatUpdate::Message(msg) => self.on_message(msg).await,
            ChatUpdate::ChannelPost(post) => self.on_channel_post(post).await,
            ChatUpdate::Reaction {
                chat_id,
                message_id,
            } => {
                debug!(chat_id, message_id, "Reaction update ignored");
            }
        }
    }

    async fn on_start(&self, msg: IncomingMessage) {
        let chat_id = msg.chat.id;
        self.session.record_chat(chat_id).await;

        if let Err(e) = self.platform.send_message(chat_id, GREETING).await {
            warn!(chat_id, "Failed to send greeting: {}", e);
        }

        info!(
            "🤖 Bot started by user: {}",
            msg.from.as_ref().map(|u| u.handle()).unwrap_or("unknown")
        );
    }

    async fn on_message(&self, msg: IncomingMessage) {
        let chat_id = msg.chat.id;
        self.session.record_chat(chat_id).await;

        if !self.classifier.is_reply_worthy(&msg) {
            return;
        }
        let Some(raw_text) = msg.text_or_caption() else {
            return;
        };

        let text = match self.classifier.strip_mention(raw_text) {
            stripped if stripped.is_empty() => raw_text.to_string(),
            stripped => stripped,
        };

        info!(chat_id, message_id = msg.message_id, "Replying to message");

        let prompt = build_prompt(Some(&prompt_message(&msg, &text)));
        let reply = generate_or_placeholder(self.generator.as_ref(), &prompt).await;

        if let Err(e) = self
            .platform
            .send_reply(chat_id, &reply, msg.message_id)
            .await
        {
            warn!(chat_id, message_id = msg.message_id, "Failed to send reply: {}", e);
        }

        if self.react_to_messages {
            self.react(&msg, &text, &to_owned_list(SAFE_REACTIONS)).await;
        }
    }

    async fn on_channel_post(&self, post: IncomingMessage) {
        let chat_id = post.chat.id;
        self.session.record_chat(chat_id).await;

        let kind = content_type(&post);
        if kind == ContentType::Unknown {
            debug!(chat_id, message_id = post.message_id, "Nothing to react to");
            return;
        }

        let palette = self.palette(chat_id).await;
        let text = match post.text_or_caption() {
            Some(text) => format!("[{}] {}", kind, text),
            None => format!("[{}]", kind),
        };

        self.react(&post, &text, &palette).await;
    }

    /// The chat's reaction palette, or the default one
    async fn palette(&self, chat_id: i64) -> Vec<String> {
        match self.platform.reaction_palette(chat_id).await {
            Ok(palette) if !palette.is_empty() => palette,
            Ok(_) => {
                debug!(chat_id, "No plain-emoji reactions reported, using default palette");
                to_owned_list(DEFAULT_REACTIONS)
            }
            Err(e) => {
                warn!(chat_id, "Failed to fetch reaction palette: {}", e);
                to_owned_list(DEFAULT_REACTIONS)
            }
        }
    }

    async fn react(&self, msg: &IncomingMessage, text: &str, allowed: &[String]) {
        let Some(emoji) = choose_reaction(self.generator.as_ref(), text, allowed).await else {
            return;
        };

        match self
            .platform
            .set_reaction(msg.chat.id, msg.message_id, &emoji)
            .await
        {
            Ok(()) => info!(chat_id = msg.chat.id, message_id = msg.message_id, %emoji, "Reacted"),
            Err(e) => warn!(
                chat_id = msg.chat.id,
                message_id = msg.message_id,
                "Failed to set reaction {}: {}",
                emoji,
                e
            ),
        }
    }
}

/// Message text for the personality prompt, with reply context when replying
fn prompt_message(msg: &IncomingMessage, text: &str) -> String {
    let Some(replied) = msg.reply_to_message.as_deref() else {
        return text.to_string();
    };

    let commenter = msg
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .or_else(|| msg.sender_chat.as_ref().and_then(|c| c.title.as_deref()))
        .unwrap_or("someone");

    reply_context(
        commenter,
        reply_origin(msg).as_deref(),
        text,
        replied.text_or_caption(),
    )
}

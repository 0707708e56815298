//! Telegram bot implementation

use std::sync::Arc;

use teloxide::{
    dispatching::UpdateFilterExt,
    prelude::*,
    types::MessageReactionUpdated,
    utils::command::BotCommands,
};
use tracing::{info, warn};

use kino_core::ChatUpdate;

use crate::convert;
use crate::error::{Result, TelegramError};
use crate::handler::EventHandler;

/// Telegram bot commands
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "kino-bot commands")]
enum Command {
    #[command(description = "Say hi")]
    Start,
}

/// The bot's own account
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
}

impl BotIdentity {
    /// Ask Telegram who we are (`getMe`)
    pub async fn fetch(bot: &Bot) -> Result<Self> {
        let me = bot.get_me().await?;
        let identity = Self {
            id: me.id.0 as i64,
            username: me.username().to_string(),
        };
        info!("🤖 Bot username: {}", identity.username);
        Ok(identity)
    }
}

/// Telegram bot wrapper
pub struct KinoBot {
    bot: Bot,
    handler: Arc<EventHandler>,
}

impl KinoBot {
    /// Create a new Telegram bot
    pub fn new(bot: Bot, handler: Arc<EventHandler>) -> Self {
        Self { bot, handler }
    }

    /// Build a `Bot` from a token
    pub fn client(token: &str) -> Result<Bot> {
        if token.trim().is_empty() {
            return Err(TelegramError::TokenNotSet);
        }
        Ok(Bot::new(token))
    }

    /// Run long polling until Ctrl+C
    pub async fn start(self) -> Result<()> {
        info!("Starting Telegram bot...");

        let message_handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(|msg: Message, cmd: Command, handler: Arc<EventHandler>| async move {
                        match cmd {
                            Command::Start => dispatch(&handler, convert::start(&msg)).await,
                        }
                    }),
            )
            .branch(dptree::endpoint(|msg: Message, handler: Arc<EventHandler>| async move {
                dispatch(&handler, convert::message(&msg)).await
            }));

        let channel_handler = Update::filter_channel_post().endpoint(
            |msg: Message, handler: Arc<EventHandler>| async move {
                dispatch(&handler, convert::channel_post(&msg)).await
            },
        );

        let reaction_handler = Update::filter_message_reaction_updated().endpoint(
            |reaction: MessageReactionUpdated, handler: Arc<EventHandler>| async move {
                let update = ChatUpdate::Reaction {
                    chat_id: reaction.chat.id.0,
                    message_id: reaction.message_id.0,
                };
                dispatch(&handler, Ok(update)).await
            },
        );

        let tree = dptree::entry()
            .branch(message_handler)
            .branch(channel_handler)
            .branch(reaction_handler);

        Dispatcher::builder(self.bot, tree)
            .dependencies(dptree::deps![self.handler])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram bot stopped");
        Ok(())
    }
}

/// Hand a converted update to the handler; unconvertible updates are dropped
async fn dispatch(handler: &EventHandler, update: Result<ChatUpdate>) -> Result<()> {
    match update {
        Ok(update) => handler.handle(update).await,
        Err(e) => warn!("Dropping update: {}", e),
    }
    Ok(())
}

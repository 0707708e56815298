//! kino-bot: main binary
//!
//! Usage:
//!   kino-bot            - Run the bot (long polling + health endpoint)
//!   kino-bot --help     - Show help
//!   kino-bot --version  - Show version

use std::sync::Arc;

use kino_core::{ChatPlatform, Classifier, Config, GeminiClient, SessionState, TextGenerator};
use kino_schedule::{AmbientScheduler, RandomHours, SchedulerHandle};
use kino_telegram::{BotIdentity, EventHandler, KinoBot, TelegramPlatform};
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    Bot,
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("kino-bot {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Bot => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting kino-bot...");
    tracing::info!("Model: {}", config.llm.model);

    run(config).await
}

/// Parse command line arguments
fn parse_args(args: impl Iterator<Item = String>) -> RunMode {
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Bot
}

/// Print help message
fn print_help() {
    println!("kino-bot - Telegram movie-chat bot backed by Gemini");
    println!();
    println!("Usage:");
    println!("  kino-bot            Run the bot");
    println!("  kino-bot --help     Show this help message");
    println!("  kino-bot --version  Show version");
    println!();
    println!("Environment Variables:");
    println!("  TELEGRAM_BOT_TOKEN   Telegram bot token (required)");
    println!("  GEMINI_API_KEY       Gemini API key (required)");
    println!("  GEMINI_MODEL         Model name (default: gemini-2.0-flash)");
    println!("  GEMINI_BASE_URL      Custom API endpoint");
    println!("  PORT                 Health endpoint port (default: 5000)");
    println!("  AMBIENT_ENABLED      Send ambient messages (default: true)");
    println!("  AMBIENT_MIN_HOURS    Minimum ambient interval (default: 5)");
    println!("  AMBIENT_MAX_HOURS    Maximum ambient interval (default: 10)");
    println!("  REPLY_TO_ANY         Reply to any reply, not only to the bot (default: true)");
    println!("  REPLY_ON_MENTION     Reply when @mentioned (default: true)");
    println!("  REPLY_ON_QUESTION    Reply to questions (default: true)");
    println!("  REACT_TO_MESSAGES    React to replied messages (default: true)");
}

/// Wire everything up and run until Ctrl+C
async fn run(config: Config) -> anyhow::Result<()> {
    let generator: Arc<dyn TextGenerator> = Arc::new(
        GeminiClient::new(&config.llm)
            .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?,
    );

    let bot = KinoBot::client(&config.telegram.token)?;
    let identity = BotIdentity::fetch(&bot)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch bot identity: {}", e))?;

    let classifier = Classifier::new(identity.id, &identity.username, config.triggers.clone())?;
    let session = SessionState::new();
    let platform: Arc<dyn ChatPlatform> = Arc::new(TelegramPlatform::new(bot.clone()));

    let handler = Arc::new(
        EventHandler::new(
            Arc::clone(&platform),
            Arc::clone(&generator),
            classifier,
            session.clone(),
        )
        .with_message_reactions(config.triggers.react_to_messages),
    );

    // Health endpoint
    let listener = kino_api::bind(config.api.port).await?;
    let api_handle = tokio::spawn(async move {
        if let Err(e) = kino_api::serve(listener).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    let scheduler = start_scheduler(&config, session, generator, platform)?;

    tracing::info!("🤖 Bot launched");
    let result = KinoBot::new(bot, handler).start().await;

    tracing::info!("Shutting down...");
    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    api_handle.abort();
    tracing::info!("Shutdown complete");

    result.map_err(Into::into)
}

/// Start the ambient scheduler if enabled
fn start_scheduler(
    config: &Config,
    session: SessionState,
    generator: Arc<dyn TextGenerator>,
    platform: Arc<dyn ChatPlatform>,
) -> anyhow::Result<Option<SchedulerHandle>> {
    if !config.ambient.enabled {
        tracing::info!("Ambient messages disabled");
        return Ok(None);
    }

    let delays = RandomHours::new(config.ambient.min_hours, config.ambient.max_hours)?;
    let handle = AmbientScheduler::new(session, generator, platform, delays).start();
    Ok(Some(handle))
}

//! HTTP handlers

/// Body returned by the liveness route
pub const LIVENESS: &str = "🤖 Bot is running...";

/// Health check endpoint
pub async fn health() -> &'static str {
    LIVENESS
}

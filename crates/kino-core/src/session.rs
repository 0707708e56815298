//! Session state shared between the update handler and the ambient scheduler

use std::sync::Arc;
use tokio::sync::RwLock;

/// The last chat the bot saw traffic in.
///
/// Cloning shares the same underlying slot. Lives for the process
/// lifetime and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    last_chat_id: Arc<RwLock<Option<i64>>>,
}

impl SessionState {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a chat id (last write wins)
    pub async fn record_chat(&self, chat_id: i64) {
        *self.last_chat_id.write().await = Some(chat_id);
    }

    /// Last recorded chat id, if any
    pub async fn last_chat_id(&self) -> Option<i64> {
        *self.last_chat_id.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let session = SessionState::new();
        assert_eq!(session.last_chat_id().await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let session = SessionState::new();
        session.record_chat(1).await;
        session.record_chat(2).await;
        assert_eq!(session.last_chat_id().await, Some(2));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let session = SessionState::new();
        let handle = session.clone();
        session.record_chat(-100).await;
        assert_eq!(handle.last_chat_id().await, Some(-100));
    }
}

//! スケジューラー
//!
//! ランダムな間隔で待機し、アンビエントメッセージを送信します。

use std::sync::Arc;
use std::time::Duration;

use kino_core::prompt::build_prompt;
use kino_core::{ChatPlatform, SessionState, TextGenerator, generate_or_placeholder};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::delay::DelaySource;

/// スケジューラーのハンドル
pub struct SchedulerHandle {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    /// スケジューラーを停止
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }

    /// Whether the loop has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// What happened when the timer fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireOutcome {
    /// Message sent to this chat
    Sent(i64),
    /// No chat has been seen yet
    NoChat,
    /// Sending to this chat failed
    SendFailed(i64),
}

/// Sends an unprompted message to the last-seen chat at random intervals
pub struct AmbientScheduler {
    session: SessionState,
    generator: Arc<dyn TextGenerator>,
    platform: Arc<dyn ChatPlatform>,
    delays: Box<dyn DelaySource>,
}

impl AmbientScheduler {
    /// 新しいスケジューラーを作成
    pub fn new(
        session: SessionState,
        generator: Arc<dyn TextGenerator>,
        platform: Arc<dyn ChatPlatform>,
        delays: impl DelaySource + 'static,
    ) -> Self {
        Self {
            session,
            generator,
            platform,
            delays: Box::new(delays),
        }
    }

    /// スケジューラーを開始
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

        let handle = tokio::spawn(async move {
            info!("アンビエントスケジューラーを開始しました");
            self.run(&mut shutdown_rx).await;
            info!("アンビエントスケジューラーを停止しました");
        });

        SchedulerHandle {
            shutdown_tx,
            handle,
        }
    }

    async fn run(mut self, shutdown_rx: &mut broadcast::Receiver<()>) {
        loop {
            let delay = self.delays.next_delay();
            info!(
                next = %next_fire_time(delay).format("%Y-%m-%d %H:%M:%S"),
                "次回送信まで待機中"
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let outcome = self.fire().await;
                    debug!(?outcome, "アンビエント送信完了");
                }
                _ = shutdown_rx.recv() => {
                    info!("シャットダウン要求を受信");
                    break;
                }
            }
        }
    }

    /// One cycle: generate and send if a chat has been seen
    pub async fn fire(&self) -> FireOutcome {
        let Some(chat_id) = self.session.last_chat_id().await else {
            debug!("No chat seen yet, skipping ambient message");
            return FireOutcome::NoChat;
        };

        let text = generate_or_placeholder(self.generator.as_ref(), &build_prompt(None)).await;

        match self.platform.send_message(chat_id, &text).await {
            Ok(()) => {
                info!(chat_id, "Ambient message sent");
                FireOutcome::Sent(chat_id)
            }
            Err(e) => {
                warn!(chat_id, "Failed to send ambient message: {}", e);
                FireOutcome::SendFailed(chat_id)
            }
        }
    }
}

fn next_fire_time(delay: Duration) -> chrono::DateTime<chrono::Utc> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|d| chrono::Utc::now().checked_add_signed(d))
        .unwrap_or_else(chrono::Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::FixedDelay;
    use async_trait::async_trait;
    use kino_core::prompt::AMBIENT_PROMPT;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatPlatform for Recorder {
        async fn send_message(&self, chat_id: i64, text: &str) -> kino_core::Result<()> {
            if self.fail {
                return Err(kino_core::Error::Platform("chat not found".into()));
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }

        async fn send_reply(&self, _: i64, _: &str, _: i32) -> kino_core::Result<()> {
            unreachable!("scheduler never replies")
        }

        async fn set_reaction(&self, _: i64, _: i32, _: &str) -> kino_core::Result<()> {
            unreachable!("scheduler never reacts")
        }

        async fn reaction_palette(&self, _: i64) -> kino_core::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    struct Ambient;

    #[async_trait]
    impl TextGenerator for Ambient {
        async fn generate(&self, prompt: &str) -> kino_core::Result<String> {
            assert_eq!(prompt, AMBIENT_PROMPT);
            Ok("what are you watching these days?".to_string())
        }
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl DelaySource for Counting {
        fn next_delay(&mut self) -> Duration {
            self.calls.fetch_add(1, Ordering::SeqCst);
            5 * HOUR
        }
    }

    fn scheduler(session: SessionState, platform: Arc<Recorder>) -> AmbientScheduler {
        AmbientScheduler::new(session, Arc::new(Ambient), platform, FixedDelay(5 * HOUR))
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_run_loop_can_be_spawned() {
        let (_shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let scheduler = scheduler(SessionState::new(), Arc::new(Recorder::default()));
        let run = scheduler.run(&mut shutdown_rx);
        assert_send(&run);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_send_per_interval() {
        let session = SessionState::new();
        session.record_chat(-42).await;
        let platform = Arc::new(Recorder::default());

        let handle = scheduler(session, platform.clone()).start();

        tokio::time::sleep(5 * HOUR - Duration::from_secs(1)).await;
        assert!(platform.sent.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(platform.sent.lock().unwrap().len(), 1);

        tokio::time::sleep(5 * HOUR).await;
        {
            let sent = platform.sent.lock().unwrap();
            assert_eq!(sent.len(), 2);
            assert!(sent.iter().all(|(chat, text)| {
                *chat == -42 && text == "what are you watching these days?"
            }));
        }

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_chat_is_noop_but_rearms() {
        let calls = Arc::new(AtomicUsize::new(0));
        let platform = Arc::new(Recorder::default());
        let handle = AmbientScheduler::new(
            SessionState::new(),
            Arc::new(Ambient),
            platform.clone(),
            Counting {
                calls: calls.clone(),
            },
        )
        .start();

        tokio::time::sleep(10 * HOUR + Duration::from_secs(1)).await;

        assert!(platform.sent.lock().unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_follows_latest_chat() {
        let session = SessionState::new();
        let platform = Arc::new(Recorder::default());
        let handle = scheduler(session.clone(), platform.clone()).start();

        session.record_chat(1).await;
        session.record_chat(2).await;
        tokio::time::sleep(5 * HOUR + Duration::from_secs(1)).await;

        assert_eq!(platform.sent.lock().unwrap()[0].0, 2);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_loop() {
        let platform = Arc::new(Recorder::default());
        let handle = scheduler(SessionState::new(), platform).start();
        assert!(!handle.is_finished());
        handle.stop().await;
    }

    #[tokio::test]
    async fn test_fire_outcomes() {
        let session = SessionState::new();
        let failing = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let s = scheduler(session.clone(), failing);
        assert_eq!(s.fire().await, FireOutcome::NoChat);

        session.record_chat(7).await;
        assert_eq!(s.fire().await, FireOutcome::SendFailed(7));

        let ok = scheduler(session, Arc::new(Recorder::default()));
        assert_eq!(ok.fire().await, FireOutcome::Sent(7));
    }
}

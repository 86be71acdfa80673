//! Background liveness polling.
//!
//! Refreshes a [`ConnectionManager`] on a fixed interval so observers notice
//! the flashcard application starting or stopping without a manual refresh.

use crate::manager::ConnectionManager;
use crate::transport::FlashcardApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Polling configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Time between refreshes. The first refresh runs immediately.
    pub interval: Duration,
    /// Run the poller at all.
    pub enabled: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            enabled: true,
        }
    }
}

/// Spawn a background polling task.
///
/// Returns a handle that can be used to abort the task.
pub fn spawn_poller<A>(
    manager: Arc<ConnectionManager<A>>,
    endpoint: String,
    config: PollConfig,
) -> tokio::task::JoinHandle<()>
where
    A: FlashcardApi + 'static,
{
    tokio::spawn(async move {
        if !config.enabled {
            tracing::info!("Liveness polling disabled");
            return;
        }

        tracing::info!(
            "Liveness polling started (endpoint: {}, interval: {:?})",
            endpoint,
            config.interval
        );

        let mut timer = interval(config.interval);
        // A slow service must not cause a burst of catch-up refreshes.
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;

            let outcome = manager.refresh(&endpoint).await;
            tracing::debug!(
                "Poll: connected={} decks={}",
                outcome.connected,
                outcome.decks.len()
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockFlashcardApi;

    const URL: &str = "http://127.0.0.1:8765";

    #[tokio::test]
    async fn poller_refreshes_repeatedly() {
        let api = MockFlashcardApi::with_decks(&["A"]);
        let manager = Arc::new(ConnectionManager::new(api.clone()));
        let mut rx = manager.subscribe();

        let handle = spawn_poller(
            Arc::clone(&manager),
            URL.to_string(),
            PollConfig {
                interval: Duration::from_millis(10),
                enabled: true,
            },
        );

        tokio::time::timeout(Duration::from_secs(5), async {
            while api.probe_count() < 3 {
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("poller should keep refreshing");

        handle.abort();
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn poller_notices_service_stopping() {
        let api = MockFlashcardApi::with_decks(&["A"]);
        let manager = Arc::new(ConnectionManager::new(api.clone()));
        let mut rx = manager.subscribe();

        let handle = spawn_poller(
            Arc::clone(&manager),
            URL.to_string(),
            PollConfig {
                interval: Duration::from_millis(10),
                enabled: true,
            },
        );

        // Wait for the first connection, then stop the service.
        rx.wait_for(|s| s.is_connected).await.unwrap();
        api.set_reachable(false);

        tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|s| !s.is_connected && !s.is_loading),
        )
        .await
        .expect("poller should observe the service going away")
        .unwrap();

        handle.abort();
        assert!(manager.snapshot().decks.is_empty());
    }

    #[tokio::test]
    async fn poller_disabled() {
        let manager = Arc::new(ConnectionManager::new(MockFlashcardApi::new()));
        let config = PollConfig {
            interval: Duration::from_millis(10),
            enabled: false,
        };

        let handle = spawn_poller(Arc::clone(&manager), URL.to_string(), config);

        // Task should complete immediately when disabled
        tokio::time::timeout(Duration::from_millis(100), handle)
            .await
            .expect("Task should complete when disabled")
            .expect("Task should not panic");

        assert_eq!(manager.api().probe_count(), 0);
    }
}

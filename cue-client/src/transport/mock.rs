//! Mock flashcard service for testing.
//!
//! Serves a configurable deck list from memory, records every call, and can
//! be told to fail or to hold a probe until the test releases it.

use super::{ApiError, FlashcardApi};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// A call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `check_connection(url)`.
    CheckConnection {
        /// URL passed by the caller.
        url: String,
    },
    /// `get_decks(url)`.
    GetDecks {
        /// URL passed by the caller.
        url: String,
    },
}

/// Mock flashcard service.
///
/// Clones share state, so a test can keep one handle while the manager owns
/// another.
#[derive(Debug, Default)]
pub struct MockFlashcardApi {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    reachable: bool,
    decks: Vec<String>,
    queued_decks: VecDeque<Vec<String>>,
    fail_next_probe: Option<String>,
    fail_next_decks: Option<String>,
    probe_gates: VecDeque<oneshot::Receiver<()>>,
    calls: Vec<ApiCall>,
}

impl MockFlashcardApi {
    /// Create a mock service that is not running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a running mock service with the given decks.
    pub fn with_decks(decks: &[&str]) -> Self {
        let api = Self::new();
        api.set_reachable(true);
        api.set_decks(decks);
        api
    }

    /// Start or stop the service.
    pub fn set_reachable(&self, reachable: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.reachable = reachable;
    }

    /// Replace the deck list returned by `get_decks()`.
    pub fn set_decks(&self, decks: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        inner.decks = decks.iter().map(|d| d.to_string()).collect();
    }

    /// Queue a deck list for one `get_decks()` call, ahead of the default list.
    pub fn queue_decks(&self, decks: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .queued_decks
            .push_back(decks.iter().map(|d| d.to_string()).collect());
    }

    /// Cause the next `check_connection()` to fail with a transport error.
    pub fn fail_next_probe(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_probe = Some(error.to_string());
    }

    /// Cause the next `get_decks()` to fail with a service error.
    pub fn fail_next_decks(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_decks = Some(error.to_string());
    }

    /// Hold the next `check_connection()` until the returned sender fires
    /// (or is dropped).
    pub fn pause_next_probe(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.probe_gates.push_back(rx);
        tx
    }

    /// Get all calls made so far.
    pub fn calls(&self) -> Vec<ApiCall> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Number of liveness probes made so far.
    pub fn probe_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .calls
            .iter()
            .filter(|c| matches!(c, ApiCall::CheckConnection { .. }))
            .count()
    }

    /// Number of deck queries made so far.
    pub fn deck_query_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .calls
            .iter()
            .filter(|c| matches!(c, ApiCall::GetDecks { .. }))
            .count()
    }

    /// Clear all state (service stopped, no decks, no recorded calls).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockInner::default();
    }
}

impl Clone for MockFlashcardApi {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl FlashcardApi for MockFlashcardApi {
    async fn check_connection(&self, url: &str) -> Result<bool, ApiError> {
        let gate = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(ApiCall::CheckConnection {
                url: url.to_string(),
            });
            inner.probe_gates.pop_front()
        };

        if let Some(gate) = gate {
            // A dropped sender releases the probe as well.
            let _ = gate.await;
        }

        let mut inner = self.inner.lock().unwrap();

        // Check for forced failure
        if let Some(error) = inner.fail_next_probe.take() {
            return Err(ApiError::Transport(error));
        }

        Ok(inner.reachable)
    }

    async fn get_decks(&self, url: &str) -> Result<Vec<String>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(ApiCall::GetDecks {
            url: url.to_string(),
        });

        // Check for forced failure
        if let Some(error) = inner.fail_next_decks.take() {
            return Err(ApiError::Service(error));
        }

        if !inner.reachable {
            return Err(ApiError::Transport("connection refused".into()));
        }

        match inner.queued_decks.pop_front() {
            Some(decks) => Ok(decks),
            None => Ok(inner.decks.clone()),
        }
    }
}

//! ConnectionManager - the liveness/deck-catalog view of the flashcard service.
//!
//! # Architecture
//!
//! The manager uses the pure state machine from cue-core for transitions and
//! performs the actual calls through an injected [`FlashcardApi`].
//!
//! ```text
//! Caller → ConnectionManager → FlashcardApi → HTTP
//!                  ↓
//!          cue-core (pure state machine)
//! ```
//!
//! A refresh suspends at exactly two points: the liveness probe and, only if
//! that succeeded, the deck query. Every failure is absorbed into a
//! `Disconnected` state with an empty catalog; `refresh` itself never fails.
//!
//! # Overlapping refreshes
//!
//! Two refreshes may be in flight at once (say, an automatic check at startup
//! and a manual one). By default whichever completes last decides the state,
//! even if it started first. [`RefreshPolicy::DiscardStale`] tags each refresh
//! with a sequence number and ignores completions older than the last one
//! applied.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use cue_core::{Action, ConnectionState, DeckCatalog, Event, FailureStage, StatusEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::transport::FlashcardApi;

/// How completions of overlapping refreshes are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Every completion is applied; the last one to finish wins.
    #[default]
    LastWriteWins,
    /// Completions older than the most recently applied one are dropped.
    DiscardStale,
}

/// Point-in-time view of the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSnapshot {
    /// Service answered the last applied refresh.
    ///
    /// Keeps its previous value while a refresh is in flight.
    pub is_connected: bool,
    /// Last successfully retrieved catalog (empty when disconnected).
    pub decks: DeckCatalog,
    /// At least one refresh is in flight.
    pub is_loading: bool,
    /// Underlying state-machine state.
    pub state: ConnectionState,
}

impl Default for ConnectionSnapshot {
    fn default() -> Self {
        Self {
            is_connected: false,
            decks: DeckCatalog::new(),
            is_loading: false,
            state: ConnectionState::new(),
        }
    }
}

/// Result of a settled refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Service is connected after this refresh.
    pub connected: bool,
    /// Catalog after this refresh (empty when not connected).
    pub decks: DeckCatalog,
}

/// Tracks whether the flashcard service is up and which decks it has.
pub struct ConnectionManager<A: FlashcardApi> {
    api: A,
    policy: RefreshPolicy,
    status: watch::Sender<ConnectionSnapshot>,
    in_flight: AtomicUsize,
    next_seq: AtomicU64,
    applied_seq: AtomicU64,
}

impl<A: FlashcardApi> ConnectionManager<A> {
    /// Create a manager with the default (last-write-wins) policy.
    pub fn new(api: A) -> Self {
        Self::with_policy(api, RefreshPolicy::default())
    }

    /// Create a manager with an explicit refresh policy.
    pub fn with_policy(api: A, policy: RefreshPolicy) -> Self {
        let (status, _) = watch::channel(ConnectionSnapshot::default());
        Self {
            api,
            policy,
            status,
            in_flight: AtomicUsize::new(0),
            next_seq: AtomicU64::new(0),
            applied_seq: AtomicU64::new(0),
        }
    }

    /// Get the refresh policy.
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Get the injected service capability.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current state, without waiting.
    pub fn snapshot(&self) -> ConnectionSnapshot {
        self.status.borrow().clone()
    }

    /// Check if the last applied refresh found the service.
    pub fn is_connected(&self) -> bool {
        self.status.borrow().is_connected
    }

    /// Subscribe to every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot> {
        self.status.subscribe()
    }

    /// Probe the service at `endpoint` and, if it is live, reload its decks.
    ///
    /// Never fails: an unreachable service, or one that is reachable but does
    /// not answer the deck query, yields `connected: false` with no decks.
    pub async fn refresh(&self, endpoint: &str) -> RefreshOutcome {
        let mut in_flight = self.begin(endpoint);
        let event = self.probe_and_fetch(endpoint).await;
        in_flight.settled = true;
        self.complete(in_flight.seq, endpoint, event)
    }

    /// Run the two calls in order and turn the result into a state event.
    async fn probe_and_fetch(&self, endpoint: &str) -> Event {
        match self.api.check_connection(endpoint).await {
            Ok(true) => {}
            Ok(false) => {
                return Event::RefreshFailed {
                    stage: FailureStage::Probe,
                    reason: "service did not answer the liveness probe".into(),
                }
            }
            Err(e) => {
                return Event::RefreshFailed {
                    stage: FailureStage::Probe,
                    reason: e.to_string(),
                }
            }
        }

        match self.api.get_decks(endpoint).await {
            Ok(decks) => Event::RefreshSucceeded {
                decks: DeckCatalog::from(decks),
            },
            Err(e) => Event::RefreshFailed {
                stage: FailureStage::Decks,
                reason: e.to_string(),
            },
        }
    }

    /// Enter `Checking` and register this refresh as in flight.
    fn begin<'a>(&'a self, endpoint: &'a str) -> InFlight<'a, A> {
        let mut seq = 0;
        self.status.send_modify(|snapshot| {
            seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            self.in_flight.fetch_add(1, Ordering::SeqCst);

            let (state, actions) = snapshot.state.clone().on_event(Event::RefreshRequested);
            snapshot.state = state;
            snapshot.is_loading = true;
            apply_actions(snapshot, actions, endpoint);
        });
        tracing::debug!("Refresh #{} of {} started", seq, endpoint);
        InFlight {
            manager: self,
            endpoint,
            seq,
            settled: false,
        }
    }

    /// Unregister a refresh that was dropped before it completed.
    ///
    /// When no other refresh is left in flight, a lingering `Checking` falls
    /// back to whatever the last applied refresh established.
    fn abandon(&self, seq: u64, endpoint: &str) {
        self.status.send_modify(|snapshot| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            snapshot.is_loading = remaining > 0;

            if remaining == 0 && snapshot.state.is_checking() {
                snapshot.state = if snapshot.is_connected {
                    ConnectionState::Connected
                } else {
                    ConnectionState::Disconnected
                };
            }
        });
        tracing::debug!("Refresh #{} of {} cancelled", seq, endpoint);
    }

    /// Apply (or discard) a completed refresh and report the resulting state.
    fn complete(&self, seq: u64, endpoint: &str, event: Event) -> RefreshOutcome {
        let mut outcome = RefreshOutcome {
            connected: false,
            decks: DeckCatalog::new(),
        };
        self.status.send_modify(|snapshot| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            snapshot.is_loading = remaining > 0;

            let applied = self.applied_seq.load(Ordering::SeqCst);
            if self.policy == RefreshPolicy::DiscardStale && seq < applied {
                tracing::debug!(
                    "Refresh #{} discarded (refresh #{} already applied)",
                    seq,
                    applied
                );
            } else {
                self.applied_seq.fetch_max(seq, Ordering::SeqCst);
                let (state, actions) = snapshot.state.clone().on_event(event);
                snapshot.state = state;
                apply_actions(snapshot, actions, endpoint);
                snapshot.is_connected = snapshot.state.is_connected();
            }

            outcome.connected = snapshot.is_connected;
            outcome.decks = snapshot.decks.clone();
        });

        outcome
    }
}

/// Registration of one refresh between `begin` and `complete`.
///
/// Dropping it unsettled (the refresh future was cancelled) undoes the
/// registration so `is_loading` cannot stay set.
struct InFlight<'a, A: FlashcardApi> {
    manager: &'a ConnectionManager<A>,
    endpoint: &'a str,
    seq: u64,
    settled: bool,
}

impl<A: FlashcardApi> Drop for InFlight<'_, A> {
    fn drop(&mut self) {
        if !self.settled {
            self.manager.abandon(self.seq, self.endpoint);
        }
    }
}

impl<A: FlashcardApi> std::fmt::Debug for ConnectionManager<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("policy", &self.policy)
            .field("status", &*self.status.borrow())
            .finish()
    }
}

/// Execute state-machine actions against the published snapshot.
fn apply_actions(snapshot: &mut ConnectionSnapshot, actions: Vec<Action>, endpoint: &str) {
    for action in actions {
        match action {
            Action::ReplaceCatalog(decks) => snapshot.decks = decks,
            Action::ClearCatalog => snapshot.decks = DeckCatalog::new(),
            Action::EmitEvent(event) => log_status(endpoint, &event),
        }
    }
}

fn log_status(endpoint: &str, event: &StatusEvent) {
    match event {
        StatusEvent::Connected { decks } => {
            tracing::info!("Flashcard service at {} connected ({} decks)", endpoint, decks);
        }
        StatusEvent::CatalogRefreshed { decks } => {
            tracing::debug!("Flashcard service at {} refreshed ({} decks)", endpoint, decks);
        }
        StatusEvent::ConnectionLost { stage, reason } => {
            tracing::warn!(
                "Flashcard service at {} lost: {} failed: {}",
                endpoint,
                stage,
                reason
            );
        }
        StatusEvent::Unreachable { stage, reason } => {
            tracing::debug!(
                "Flashcard service at {} unreachable: {} failed: {}",
                endpoint,
                stage,
                reason
            );
        }
    }
}

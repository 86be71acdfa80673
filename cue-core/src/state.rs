//! Connection state machine for the flashcard service.
//!
//! This module provides a pure, side-effect-free state machine for the
//! liveness/deck-discovery cycle. It takes events as input and produces a new
//! state plus a list of actions to execute.
//!
//! The actual I/O (probing the service, fetching decks) is performed by
//! `cue-client`, not by this module.
//!
//! Refreshes may overlap, so completion events are accepted from every state:
//! whichever completion is applied last decides the resulting state.

use serde::Serialize;

use crate::catalog::DeckCatalog;

/// Connection state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    /// Service not reachable (or never checked).
    Disconnected,
    /// A refresh is in progress.
    Checking {
        /// Whether the service was connected when the refresh started.
        previously_connected: bool,
    },
    /// Service answered both the liveness probe and the deck query.
    Connected,
}

impl ConnectionState {
    /// Create a new state machine in the Disconnected state.
    pub fn new() -> Self {
        Self::Disconnected
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (cue-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        let was_connected = self.was_connected();

        match event {
            Event::RefreshRequested => (
                Self::Checking {
                    previously_connected: was_connected,
                },
                vec![],
            ),

            Event::RefreshSucceeded { decks } => {
                let count = decks.len();
                let status = if was_connected {
                    StatusEvent::CatalogRefreshed { decks: count }
                } else {
                    StatusEvent::Connected { decks: count }
                };
                (
                    Self::Connected,
                    vec![Action::ReplaceCatalog(decks), Action::EmitEvent(status)],
                )
            }

            Event::RefreshFailed { stage, reason } => {
                let status = if was_connected {
                    StatusEvent::ConnectionLost { stage, reason }
                } else {
                    StatusEvent::Unreachable { stage, reason }
                };
                (
                    Self::Disconnected,
                    vec![Action::ClearCatalog, Action::EmitEvent(status)],
                )
            }
        }
    }

    /// Check if currently connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Check if a refresh is in progress.
    pub fn is_checking(&self) -> bool {
        matches!(self, Self::Checking { .. })
    }

    /// Connected now, or connected when the current check began.
    fn was_connected(&self) -> bool {
        matches!(
            self,
            Self::Connected
                | Self::Checking {
                    previously_connected: true
                }
        )
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur in the refresh lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A caller asked for a refresh.
    RefreshRequested,
    /// Probe and deck query both succeeded.
    RefreshSucceeded {
        /// Deck catalog returned by the service.
        decks: DeckCatalog,
    },
    /// Probe or deck query failed.
    RefreshFailed {
        /// Which call failed.
        stage: FailureStage,
        /// Error message describing the failure.
        reason: String,
    },
}

/// Which of the two refresh calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Liveness probe failed or reported the service as down.
    Probe,
    /// Service was live but the deck query failed.
    Decks,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probe => f.write_str("liveness probe"),
            Self::Decks => f.write_str("deck query"),
        }
    }
}

/// Actions to be executed by the connection manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the cached catalog wholesale.
    ReplaceCatalog(DeckCatalog),
    /// Drop the cached catalog.
    ClearCatalog,
    /// Emit an event to the application.
    EmitEvent(StatusEvent),
}

/// Events emitted to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Service became reachable.
    Connected {
        /// Number of decks reported.
        decks: usize,
    },
    /// Service was already reachable and the catalog was reloaded.
    CatalogRefreshed {
        /// Number of decks reported.
        decks: usize,
    },
    /// Service was reachable before this refresh and no longer is.
    ConnectionLost {
        /// Which call failed.
        stage: FailureStage,
        /// Error message describing the failure.
        reason: String,
    },
    /// Service is still not reachable.
    Unreachable {
        /// Which call failed.
        stage: FailureStage,
        /// Error message describing the failure.
        reason: String,
    },
}

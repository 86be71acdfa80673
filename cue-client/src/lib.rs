//! # cue-client
//!
//! Connection manager for the local flashcard application.
//!
//! This is the library the rest of cuedeck uses to find out whether the
//! flashcard service is running and which decks it offers.
//!
//! ## Features
//!
//! - **Capability Abstraction**: the service is reached through the
//!   [`FlashcardApi`] trait (AnkiConnect over HTTP, mock for tests)
//! - **Absorbed Failures**: refreshes never fail; an unreachable service is
//!   just a disconnected state with an empty deck catalog
//! - **Observable State**: snapshots are published over a `watch` channel
//! - **Pure State Machine**: transitions come from `cue-core`
//!
//! ## Example
//!
//! ```ignore
//! use cue_client::{AnkiConnectClient, AnkiConnectConfig, ConnectionManager};
//!
//! let api = AnkiConnectClient::new(AnkiConnectConfig::default())?;
//! let manager = ConnectionManager::new(api);
//!
//! let outcome = manager.refresh("http://127.0.0.1:8765").await;
//! if outcome.connected {
//!     for deck in &outcome.decks {
//!         println!("{deck}");
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod poller;
pub mod transport;

pub use manager::{ConnectionManager, ConnectionSnapshot, RefreshOutcome, RefreshPolicy};
pub use poller::{spawn_poller, PollConfig};
pub use transport::{
    AnkiConnectClient, AnkiConnectConfig, ApiCall, ApiError, FlashcardApi, MockFlashcardApi,
    DEFAULT_API_VERSION, DEFAULT_ENDPOINT,
};

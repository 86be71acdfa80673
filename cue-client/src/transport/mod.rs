//! Flashcard-service capability for cuedeck.
//!
//! The connection manager never talks HTTP itself. It is handed something
//! implementing [`FlashcardApi`], which answers two questions:
//! - `check_connection()` - is the service up at this URL?
//! - `get_decks()` - which decks does it have?
//!
//! [`AnkiConnectClient`] answers them over the AnkiConnect JSON protocol,
//! [`MockFlashcardApi`] answers them from memory for tests and demos.
//!
//! # Example
//!
//! ```ignore
//! let api = MockFlashcardApi::with_decks(&["Default"]);
//! assert!(api.check_connection("http://127.0.0.1:8765").await?);
//! let decks = api.get_decks("http://127.0.0.1:8765").await?;
//! ```

mod anki;
mod mock;

pub use anki::{AnkiConnectClient, AnkiConnectConfig, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
pub use mock::{ApiCall, MockFlashcardApi};

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Flashcard-service errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never got an HTTP response (refused, timed out, DNS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Service answered with an error envelope.
    #[error("service error: {0}")]
    Service(String),

    /// Response body could not be understood.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// What cuedeck needs from the flashcard application.
///
/// Implementations own their timeout policy; callers do not add one.
#[async_trait]
pub trait FlashcardApi: Send + Sync {
    /// Liveness probe: `Ok(true)` iff the service answers at `url`.
    async fn check_connection(&self, url: &str) -> Result<bool, ApiError>;

    /// Full list of deck names.
    ///
    /// Only called right after `check_connection` returned `Ok(true)`.
    async fn get_decks(&self, url: &str) -> Result<Vec<String>, ApiError>;
}

#[async_trait]
impl<T: FlashcardApi + ?Sized> FlashcardApi for Box<T> {
    async fn check_connection(&self, url: &str) -> Result<bool, ApiError> {
        (**self).check_connection(url).await
    }

    async fn get_decks(&self, url: &str) -> Result<Vec<String>, ApiError> {
        (**self).get_decks(url).await
    }
}

#[async_trait]
impl<T: FlashcardApi + ?Sized> FlashcardApi for Arc<T> {
    async fn check_connection(&self, url: &str) -> Result<bool, ApiError> {
        (**self).check_connection(url).await
    }

    async fn get_decks(&self, url: &str) -> Result<Vec<String>, ApiError> {
        (**self).get_decks(url).await
    }
}

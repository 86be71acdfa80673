//! AnkiConnect HTTP client.
//!
//! AnkiConnect exposes a single JSON-over-HTTP endpoint. Every request is a
//! `POST` of `{"action": ..., "version": ...}` and every answer is an envelope
//! `{"result": ..., "error": ...}` where exactly one side is non-null.

use super::{ApiError, FlashcardApi};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where AnkiConnect listens unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8765";

/// AnkiConnect protocol version cuedeck speaks.
pub const DEFAULT_API_VERSION: u32 = 6;

/// AnkiConnect client configuration.
#[derive(Debug, Clone)]
pub struct AnkiConnectConfig {
    /// Protocol version sent with every request.
    pub api_version: u32,
    /// Per-request timeout. A hung service is reported as a transport error.
    pub request_timeout: Duration,
}

impl Default for AnkiConnectConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION,
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    action: &'a str,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Client for the AnkiConnect automation endpoint.
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    config: AnkiConnectConfig,
    http: reqwest::Client,
}

impl AnkiConnectClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: AnkiConnectConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &AnkiConnectConfig {
        &self.config
    }

    /// Send one action and unwrap its envelope.
    async fn invoke<T: DeserializeOwned>(&self, url: &str, action: &str) -> Result<T, ApiError> {
        let request = Request {
            action,
            version: self.config.api_version,
        };
        let response = self.http.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let envelope: Envelope<T> = response.json().await?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Service(error));
        }

        envelope
            .result
            .ok_or_else(|| ApiError::Decode(format!("{action}: response has no result")))
    }
}

#[async_trait]
impl FlashcardApi for AnkiConnectClient {
    async fn check_connection(&self, url: &str) -> Result<bool, ApiError> {
        match self.invoke::<serde_json::Value>(url, "version").await {
            Ok(version) => {
                tracing::debug!("AnkiConnect at {} answered version {}", url, version);
                Ok(true)
            }
            Err(ApiError::Transport(e)) => Err(ApiError::Transport(e)),
            // Something answered, but not a working AnkiConnect.
            Err(e) => {
                tracing::debug!("AnkiConnect probe at {} rejected: {}", url, e);
                Ok(false)
            }
        }
    }

    async fn get_decks(&self, url: &str) -> Result<Vec<String>, ApiError> {
        self.invoke(url, "deckNames").await
    }
}

//! Error types for cuedeck's pure layer.

use thiserror::Error;

/// Errors raised by the time codec and media namer.
///
/// These are caller bugs (malformed numbers or timestamps) and are never
/// caught inside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Malformed numeric or time input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CodecError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }
}

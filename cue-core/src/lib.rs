//! # cue-core
//!
//! Pure logic for cuedeck (no I/O, instant tests).
//!
//! This crate holds everything about subtitle cues and flashcard-service
//! connectivity that can be expressed without touching the network or disk:
//! - [`timecode`] - seconds ↔ display strings, subtitle timestamp parsing
//! - [`naming`] - deterministic, filesystem-safe media file names
//! - [`catalog`] - the deck catalog reported by the flashcard service
//! - [`state`] - the connection state machine driven by `cue-client`
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. Identical inputs always give identical outputs, which
//! matters here because media file names double as cache keys for clips that
//! were already generated for the same cue.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
mod error;
pub mod naming;
pub mod state;
pub mod timecode;

pub use catalog::DeckCatalog;
pub use error::CodecError;
pub use naming::{cue_file_name, make_file_name, MediaExtension, MediaFileName, MAX_CAPTION_CHARS};
pub use state::{Action, ConnectionState, Event, FailureStage, StatusEvent};
pub use timecode::{parse_subtitle_timestamp, to_display_string, to_filename_token, TimeCode};

//! CLI command implementations.

pub mod decks;
pub mod name;
pub mod status;
pub mod time;
pub mod watch;

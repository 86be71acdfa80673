//! # cuedeck
//!
//! Command-line front end for cuedeck.
//!
//! ## Commands
//!
//! - `status`: Check whether the flashcard service is running
//! - `decks`: List the service's decks
//! - `watch`: Poll the service and print every connectivity change
//! - `name`: Build the media file name for a subtitle cue
//! - `time`: Convert between seconds and display/filename/subtitle timestamps
//!
//! ## Example
//!
//! ```bash
//! # Is Anki running with AnkiConnect?
//! cuedeck status
//!
//! # Which decks can cards go into?
//! cuedeck decks
//!
//! # Name the screenshot for a cue at 1:02
//! cuedeck name lesson1.mp4 --ext jpg --at 00:01:02.500 --caption "Hello/World:!"
//!
//! # Parse an SRT timestamp
//! cuedeck time parse 00:01:02,250
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cue_client::{AnkiConnectClient, ConnectionManager, FlashcardApi, MockFlashcardApi};
use cue_core::MediaExtension;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{decks, name, status, time, watch};
use config::Config;

/// Decks served by `--mock`.
const DEMO_DECKS: &[&str] = &["Default", "Japanese::Mining", "Spanish::Vocab"];

/// Flashcard-service status and cue media naming.
#[derive(Parser, Debug)]
#[command(name = "cuedeck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Flashcard service URL, overriding the configuration
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Use an in-memory flashcard service instead of HTTP (for testing/demo)
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether the flashcard service is running
    Status {
        /// Print the connection snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the flashcard service's decks
    Decks,

    /// Poll the flashcard service and print connectivity changes
    Watch {
        /// Seconds between checks (overrides the configuration)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Build the media file name for a subtitle cue
    Name {
        /// Source video name (its extension is dropped)
        video: String,

        /// Media kind: jpg or wav
        #[arg(long, short)]
        ext: MediaExtension,

        /// Cue start, as seconds or a subtitle timestamp
        #[arg(long, allow_hyphen_values = true)]
        at: Option<String>,

        /// Caption text to include
        #[arg(long, short)]
        caption: Option<String>,
    },

    /// Convert cue times
    Time {
        #[command(subcommand)]
        op: time::TimeOp,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.flashcards.endpoint = endpoint;
    }

    init_tracing(&config.logging.filter);
    tracing::debug!(
        "Flashcard service at {} (mock: {})",
        config.flashcards.endpoint,
        cli.mock
    );

    match cli.command {
        Commands::Status { json } => {
            let manager = build_manager(&config, cli.mock)?;
            status::run(&manager, &config.flashcards.endpoint, json).await?;
        }
        Commands::Decks => {
            let manager = build_manager(&config, cli.mock)?;
            decks::run(&manager, &config.flashcards.endpoint).await?;
        }
        Commands::Watch { interval } => {
            let manager = Arc::new(build_manager(&config, cli.mock)?);
            let mut poll = config.poll_config();
            if let Some(secs) = interval {
                poll.interval = std::time::Duration::from_secs(secs.max(1));
            }
            watch::run(manager, config.flashcards.endpoint.clone(), poll).await?;
        }
        Commands::Name {
            video,
            ext,
            at,
            caption,
        } => {
            name::run(&video, ext, at.as_deref(), caption.as_deref())?;
        }
        Commands::Time { op } => {
            time::run(op)?;
        }
    }

    Ok(())
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over the config.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a manager over AnkiConnect, or over the in-memory mock.
fn build_manager(config: &Config, mock: bool) -> Result<ConnectionManager<Box<dyn FlashcardApi>>> {
    let api: Box<dyn FlashcardApi> = if mock {
        Box::new(MockFlashcardApi::with_decks(DEMO_DECKS))
    } else {
        Box::new(AnkiConnectClient::new(config.anki_config()).context("Failed to build HTTP client")?)
    };

    Ok(ConnectionManager::with_policy(
        api,
        config.flashcards.refresh_policy,
    ))
}

//! Show flashcard-service status.

use anyhow::Result;
use cue_client::{ConnectionManager, ConnectionSnapshot, FlashcardApi};

/// Run the status command.
pub async fn run<A: FlashcardApi>(
    manager: &ConnectionManager<A>,
    endpoint: &str,
    json: bool,
) -> Result<()> {
    manager.refresh(endpoint).await;
    let snapshot = manager.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(endpoint, &snapshot));
    }

    Ok(())
}

/// Human-readable status report.
pub fn render(endpoint: &str, snapshot: &ConnectionSnapshot) -> String {
    let mut out = String::new();
    out.push_str("=== cuedeck status ===\n\n");
    out.push_str("Flashcard service:\n");
    out.push_str(&format!("  Endpoint: {}\n", endpoint));

    if snapshot.is_connected {
        out.push_str("  Status:   CONNECTED\n");
        out.push_str(&format!("  Decks:    {}\n", snapshot.decks.len()));
    } else {
        out.push_str("  Status:   NOT RUNNING\n");
        out.push('\n');
        out.push_str("Start Anki with the AnkiConnect add-on, then run 'cuedeck status' again.\n");
    }

    out
}

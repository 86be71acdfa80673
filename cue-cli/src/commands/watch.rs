//! Poll the flashcard service and print connectivity changes.

use anyhow::Result;
use cue_client::{spawn_poller, ConnectionManager, ConnectionSnapshot, FlashcardApi, PollConfig};
use cue_core::DeckCatalog;
use std::sync::Arc;

/// Last state printed, to suppress repeats.
type Printed = Option<(bool, DeckCatalog)>;

/// Run the watch command until Ctrl-C.
pub async fn run<A: FlashcardApi + 'static>(
    manager: Arc<ConnectionManager<A>>,
    endpoint: String,
    poll: PollConfig,
) -> Result<()> {
    if !poll.enabled {
        println!("Polling is disabled in the configuration ([poll] enabled = false)");
        return Ok(());
    }

    println!("Watching {} (Ctrl-C to stop)", endpoint);

    let mut rx = manager.subscribe();
    let handle = spawn_poller(Arc::clone(&manager), endpoint, poll);
    let mut printed: Printed = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                if let Some(line) = describe_change(&mut printed, &snapshot) {
                    println!("{}", line);
                }
            }
            _ = &mut shutdown => break,
        }
    }

    handle.abort();
    Ok(())
}

/// A line for `snapshot` if it settled into something not yet printed.
fn describe_change(printed: &mut Printed, snapshot: &ConnectionSnapshot) -> Option<String> {
    if snapshot.is_loading {
        return None;
    }

    let current = (snapshot.is_connected, snapshot.decks.clone());
    if printed.as_ref() == Some(&current) {
        return None;
    }
    *printed = Some(current);

    Some(if snapshot.decks.is_empty() && snapshot.is_connected {
        "connected: no decks".to_string()
    } else if snapshot.is_connected {
        let names: Vec<&str> = snapshot.decks.iter().map(String::as_str).collect();
        format!("connected: {}", names.join(", "))
    } else {
        "disconnected".to_string()
    })
}

//! List the flashcard service's decks.

use anyhow::Result;
use cue_client::{ConnectionManager, FlashcardApi};

/// Run the decks command.
pub async fn run<A: FlashcardApi>(manager: &ConnectionManager<A>, endpoint: &str) -> Result<()> {
    let outcome = manager.refresh(endpoint).await;
    if !outcome.connected {
        anyhow::bail!("Flashcard service not reachable at {}", endpoint);
    }

    for deck in &outcome.decks {
        println!("{}", deck);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_client::MockFlashcardApi;

    const URL: &str = "http://127.0.0.1:8765";

    #[tokio::test]
    async fn lists_decks_when_connected() {
        let manager = ConnectionManager::new(MockFlashcardApi::with_decks(&["Default"]));
        assert!(run(&manager, URL).await.is_ok());
    }

    #[tokio::test]
    async fn fails_when_service_is_down() {
        let manager = ConnectionManager::new(MockFlashcardApi::new());

        let err = run(&manager, URL).await.unwrap_err();
        assert!(err.to_string().contains("not reachable"));
    }
}

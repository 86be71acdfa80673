//! Deck catalog reported by the flashcard service.

use serde::{Deserialize, Serialize};

/// Ordered deck names, unique by name.
///
/// Built from whatever the service returns; when a name repeats, the first
/// occurrence keeps its position and later ones are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DeckCatalog(Vec<String>);

impl DeckCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deck names in service order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of decks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no decks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if a deck with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|deck| deck == name)
    }

    /// Iterate over deck names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Consume into the list of names.
    pub fn into_names(self) -> Vec<String> {
        self.0
    }
}

impl FromIterator<String> for DeckCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self(names)
    }
}

impl From<Vec<String>> for DeckCatalog {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<DeckCatalog> for Vec<String> {
    fn from(catalog: DeckCatalog) -> Self {
        catalog.0
    }
}

impl<'a> IntoIterator for &'a DeckCatalog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_service_order() {
        let catalog = DeckCatalog::from(names(&["Default", "Japanese::N5", "Spanish"]));
        assert_eq!(catalog.names(), names(&["Default", "Japanese::N5", "Spanish"]));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let catalog = DeckCatalog::from(names(&["B", "A", "B", "C", "A"]));
        assert_eq!(catalog.names(), names(&["B", "A", "C"]));
    }

    #[test]
    fn contains_is_exact() {
        let catalog = DeckCatalog::from(names(&["Japanese"]));
        assert!(catalog.contains("Japanese"));
        assert!(!catalog.contains("japanese"));
    }

    #[test]
    fn empty_by_default() {
        assert!(DeckCatalog::new().is_empty());
    }

    #[test]
    fn deserializing_deduplicates() {
        let catalog: DeckCatalog = serde_json::from_str(r#"["A","A","B"]"#).unwrap();
        assert_eq!(catalog.names(), names(&["A", "B"]));
    }

    #[test]
    fn serializes_as_list() {
        let catalog = DeckCatalog::from(names(&["A", "B"]));
        assert_eq!(serde_json::to_string(&catalog).unwrap(), r#"["A","B"]"#);
    }
}

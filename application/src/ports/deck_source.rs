//! Deck source port
//!
//! Supplies the candidate pools of a deck. Decks are materialized once,
//! before a sequence starts; the core never reads them incrementally.

use council_domain::{CardPool, DeckKind};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while loading a deck
#[derive(Error, Debug)]
pub enum DeckSourceError {
    #[error("Deck '{deck}' not found at {location}")]
    Missing { deck: DeckKind, location: String },

    #[error("Deck '{deck}' could not be read: {reason}")]
    Unreadable { deck: DeckKind, reason: String },

    #[error("Deck '{deck}' is malformed: {reason}")]
    Malformed { deck: DeckKind, reason: String },
}

/// Port for loading decks
pub trait DeckSource: Send + Sync {
    fn load(&self, deck: DeckKind) -> Result<CardPool, DeckSourceError>;
}

/// Decks held in memory (tests, embedded decks)
#[derive(Default)]
pub struct InMemoryDeckSource {
    decks: HashMap<DeckKind, CardPool>,
}

impl InMemoryDeckSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(mut self, deck: DeckKind, pool: CardPool) -> Self {
        self.decks.insert(deck, pool);
        self
    }
}

impl DeckSource for InMemoryDeckSource {
    fn load(&self, deck: DeckKind) -> Result<CardPool, DeckSourceError> {
        self.decks
            .get(&deck)
            .cloned()
            .ok_or_else(|| DeckSourceError::Missing {
                deck,
                location: "memory".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_in_memory_source() {
        let mut pools = BTreeMap::new();
        pools.insert("regions".to_string(), vec!["FOREST".to_string()]);
        let source =
            InMemoryDeckSource::new().with_deck(DeckKind::DeckOfWorlds, CardPool::new(pools));

        assert!(source.load(DeckKind::DeckOfWorlds).unwrap().contains("regions"));
        assert!(matches!(
            source.load(DeckKind::StoryEngine),
            Err(DeckSourceError::Missing { .. })
        ));
    }
}

//! Deck files
//!
//! Loads card decks from JSON files (`pool name -> [card labels]`).

mod json_loader;

pub use json_loader::{DEFAULT_DECK_DIR, DeckLoadError, JsonDeckLoader};

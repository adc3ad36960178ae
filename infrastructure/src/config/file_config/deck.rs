//! Deck configuration from TOML (`[deck]` section)

use crate::deck::{DEFAULT_DECK_DIR, JsonDeckLoader};
use council_domain::DeckKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where deck files are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeckConfig {
    /// Directory holding the default deck file names
    pub dir: PathBuf,
    /// Explicit Story Engine deck file
    pub story_engine: Option<PathBuf>,
    /// Explicit Deck of Worlds file
    pub deck_of_worlds: Option<PathBuf>,
}

impl Default for FileDeckConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DECK_DIR),
            story_engine: None,
            deck_of_worlds: None,
        }
    }
}

impl FileDeckConfig {
    pub fn loader(&self) -> JsonDeckLoader {
        let mut loader = JsonDeckLoader::new(&self.dir);
        if let Some(path) = &self.story_engine {
            loader = loader.with_path(DeckKind::StoryEngine, path);
        }
        if let Some(path) = &self.deck_of_worlds {
            loader = loader.with_path(DeckKind::DeckOfWorlds, path);
        }
        loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_explicit_paths_override_dir() {
        let config = FileDeckConfig {
            dir: PathBuf::from("decks"),
            story_engine: Some(PathBuf::from("/tmp/se.json")),
            deck_of_worlds: None,
        };
        let loader = config.loader();
        assert_eq!(
            loader.path_for(DeckKind::StoryEngine),
            Some(Path::new("/tmp/se.json"))
        );
        assert_eq!(
            loader.path_for(DeckKind::DeckOfWorlds),
            Some(Path::new("decks/deck_of_worlds.json"))
        );
    }
}

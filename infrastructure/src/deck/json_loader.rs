//! JSON deck loader implementing the [`DeckSource`] port.

use council_application::ports::deck_source::{DeckSource, DeckSourceError};
use council_domain::{CardPool, DeckKind};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Directory searched for deck files when none is configured
pub const DEFAULT_DECK_DIR: &str = "files";

/// Errors that can occur while reading a deck file
#[derive(Error, Debug)]
pub enum DeckLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON object of card pools")]
    NotAnObject { path: PathBuf },
}

impl DeckLoadError {
    fn into_source_error(self, deck: DeckKind) -> DeckSourceError {
        let reason = self.to_string();
        match self {
            DeckLoadError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                DeckSourceError::Missing {
                    deck,
                    location: path.display().to_string(),
                }
            }
            DeckLoadError::Io { .. } => DeckSourceError::Unreadable { deck, reason },
            DeckLoadError::Json { .. } | DeckLoadError::NotAnObject { .. } => {
                DeckSourceError::Malformed { deck, reason }
            }
        }
    }
}

/// Loads decks from JSON files, one file per [`DeckKind`]
///
/// Each file is an object mapping pool names to arrays of card labels.
/// Entries that are not string arrays are skipped with a warning.
#[derive(Debug, Clone)]
pub struct JsonDeckLoader {
    paths: HashMap<DeckKind, PathBuf>,
}

impl JsonDeckLoader {
    /// Loader looking for each deck's default file name inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let paths = DeckKind::all()
            .iter()
            .map(|deck| (*deck, dir.join(deck.default_file_name())))
            .collect();
        Self { paths }
    }

    /// Override the file used for `deck`.
    pub fn with_path(mut self, deck: DeckKind, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(deck, path.into());
        self
    }

    pub fn path_for(&self, deck: DeckKind) -> Option<&Path> {
        self.paths.get(&deck).map(PathBuf::as_path)
    }

    /// Read and parse one deck file.
    pub fn read_file(path: &Path) -> Result<CardPool, DeckLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeckLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| DeckLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(entries) = value else {
            return Err(DeckLoadError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        let mut pools = BTreeMap::new();
        for (name, entry) in entries {
            match entry {
                Value::Array(items) => {
                    let cards: Vec<String> = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(label) => Some(label),
                            other => {
                                warn!("Skipping non-string card {} in pool '{}'", other, name);
                                None
                            }
                        })
                        .collect();
                    pools.insert(name, cards);
                }
                _ => warn!("Skipping non-array entry '{}' in {}", name, path.display()),
            }
        }

        let pool = CardPool::new(pools);
        debug!(path = %path.display(), pools = pool.len(), "Deck loaded");
        Ok(pool)
    }
}

impl Default for JsonDeckLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DECK_DIR)
    }
}

impl DeckSource for JsonDeckLoader {
    fn load(&self, deck: DeckKind) -> Result<CardPool, DeckSourceError> {
        let path = self
            .paths
            .get(&deck)
            .ok_or_else(|| DeckSourceError::Missing {
                deck,
                location: "no path configured".to_string(),
            })?;
        Self::read_file(path).map_err(|e| e.into_source_error(deck))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_loads_default_file_names() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "story_engine_main_deck.json",
            r#"{"agents": ["A DETECTIVE", "A THIEF"], "engines": ["WANTS TO SOLVE"]}"#,
        );
        write(
            dir.path(),
            "deck_of_worlds.json",
            r#"{"regions": ["FOREST"]}"#,
        );

        let loader = JsonDeckLoader::new(dir.path());
        let story = loader.load(DeckKind::StoryEngine).unwrap();
        assert_eq!(story.pool("agents").unwrap().len(), 2);
        assert!(story.contains("engines"));

        let worlds = loader.load(DeckKind::DeckOfWorlds).unwrap();
        assert!(worlds.contains("regions"));
    }

    #[test]
    fn test_skips_non_array_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "deck.json",
            r#"{"name": "Story Engine", "agents": ["A GHOST", 7, "A KING"]}"#,
        );

        let pool = JsonDeckLoader::read_file(&path).unwrap();
        assert!(!pool.contains("name"));
        let labels: Vec<&str> = pool.pool("agents").unwrap().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["A GHOST", "A KING"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonDeckLoader::new(dir.path())
            .load(DeckKind::StoryEngine)
            .unwrap_err();
        assert!(matches!(err, DeckSourceError::Missing { .. }));
    }

    #[test]
    fn test_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "broken.json", "{ not json");
        let list = write(dir.path(), "list.json", r#"["A", "B"]"#);

        let loader = JsonDeckLoader::new(dir.path())
            .with_path(DeckKind::StoryEngine, &broken)
            .with_path(DeckKind::DeckOfWorlds, &list);

        assert!(matches!(
            loader.load(DeckKind::StoryEngine),
            Err(DeckSourceError::Malformed { .. })
        ));
        assert!(matches!(
            loader.load(DeckKind::DeckOfWorlds),
            Err(DeckSourceError::Malformed { .. })
        ));
    }
}

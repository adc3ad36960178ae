//! Card decks and candidate pools
//!
//! A deck is a read-only mapping from pool name to the labels that can be
//! drawn from it. Decks are loaded once, before a sequence starts.

use crate::debate::{Candidate, DecisionType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Which physical deck a recipe draws from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    #[default]
    StoryEngine,
    DeckOfWorlds,
}

impl DeckKind {
    pub fn all() -> &'static [DeckKind] {
        &[DeckKind::StoryEngine, DeckKind::DeckOfWorlds]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeckKind::StoryEngine => "story_engine",
            DeckKind::DeckOfWorlds => "deck_of_worlds",
        }
    }

    /// File name the deck is stored under when no explicit path is configured
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DeckKind::StoryEngine => "story_engine_main_deck.json",
            DeckKind::DeckOfWorlds => "deck_of_worlds.json",
        }
    }

    /// Prefix for archive file names of batch runs over this deck
    pub fn archive_prefix(&self) -> &'static str {
        match self {
            DeckKind::StoryEngine => "story_prompts",
            DeckKind::DeckOfWorlds => "microsettings",
        }
    }
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "story_engine" | "story" => Ok(DeckKind::StoryEngine),
            "deck_of_worlds" | "worlds" => Ok(DeckKind::DeckOfWorlds),
            other => Err(format!(
                "Unknown deck: {other}. Valid options: story_engine, deck_of_worlds"
            )),
        }
    }
}

/// Named pools of candidate labels
///
/// Labels are deduplicated per pool on construction (first occurrence
/// wins), so a draw can never offer the same label twice.
///
/// # Example
///
/// ```
/// use council_domain::{CardPool, DecisionType};
/// use std::collections::BTreeMap;
///
/// let mut pools = BTreeMap::new();
/// pools.insert(
///     "agents".to_string(),
///     vec!["A DETECTIVE".to_string(), "A THIEF".to_string(), "A DETECTIVE".to_string()],
/// );
/// let pool = CardPool::new(pools);
///
/// // A suffixed decision draws from its base pool.
/// let agents = pool.pool_for(&DecisionType::nth("agents", 2)).unwrap();
/// assert_eq!(agents.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct CardPool {
    pools: BTreeMap<String, Vec<Candidate>>,
}

impl CardPool {
    pub fn new(pools: BTreeMap<String, Vec<String>>) -> Self {
        let pools = pools
            .into_iter()
            .map(|(name, labels)| {
                let mut seen = HashSet::new();
                let unique = labels
                    .into_iter()
                    .filter(|label| seen.insert(label.clone()))
                    .map(Candidate::new)
                    .collect();
                (name, unique)
            })
            .collect();
        Self { pools }
    }

    /// Pool by its exact name
    pub fn pool(&self, name: &str) -> Option<&[Candidate]> {
        self.pools.get(name).map(Vec::as_slice)
    }

    /// Pool a decision draws from (its base name, suffix stripped)
    pub fn pool_for(&self, decision: &DecisionType) -> Option<&[Candidate]> {
        self.pool(decision.base())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for CardPool {
    fn from(pools: BTreeMap<String, Vec<String>>) -> Self {
        Self::new(pools)
    }
}

impl From<CardPool> for BTreeMap<String, Vec<String>> {
    fn from(pool: CardPool) -> Self {
        pool.pools
            .into_iter()
            .map(|(name, cards)| (name, cards.into_iter().map(Candidate::into_label).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(entries: &[(&str, &[&str])]) -> CardPool {
        CardPool::new(
            entries
                .iter()
                .map(|(name, labels)| {
                    (
                        name.to_string(),
                        labels.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_deck_kind_from_str() {
        assert_eq!("story_engine".parse::<DeckKind>().unwrap(), DeckKind::StoryEngine);
        assert_eq!("deck-of-worlds".parse::<DeckKind>().unwrap(), DeckKind::DeckOfWorlds);
        assert!("tarot".parse::<DeckKind>().is_err());
    }

    #[test]
    fn test_deck_kind_display_round_trip() {
        for kind in DeckKind::all() {
            assert_eq!(kind.to_string().parse::<DeckKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let pool = pools(&[("agents", &["A KING", "A THIEF", "A KING", "A GHOST"])]);
        let labels: Vec<&str> = pool.pool("agents").unwrap().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["A KING", "A THIEF", "A GHOST"]);
    }

    #[test]
    fn test_pool_for_strips_suffix() {
        let pool = pools(&[("aspects", &["LOST", "CURSED"])]);
        assert!(pool.pool_for(&DecisionType::nth("aspects", 2)).is_some());
        assert!(pool.pool_for(&DecisionType::new("agents")).is_none());
    }

    #[test]
    fn test_deserialize_from_deck_json() {
        let json = r#"{"agents": ["A DETECTIVE", "A THIEF"], "engines": ["WANTS TO SOLVE"]}"#;
        let pool: CardPool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.len(), 2);
        assert!(pool.contains("engines"));
        assert_eq!(pool.names().collect::<Vec<_>>(), vec!["agents", "engines"]);
    }
}

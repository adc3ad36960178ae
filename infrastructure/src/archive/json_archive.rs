//! JSON archive writer.
//!
//! File layout: `<dir>/<prefix>_<YYYYmmddHHMMSS>.json`, where the prefix
//! depends on the deck the batch drew from (`story_prompts` or
//! `microsettings`).

use council_application::SequenceOutcome;
use council_domain::{DecisionRecord, DecisionSequence, DeckKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing an archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to create archive directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize archive: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Settings the batch ran with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub model: String,
    pub opinion_rounds: usize,
    pub candidates_per_draw: usize,
}

/// Final prompt of one successful recipe run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedPrompt {
    #[serde(rename = "type")]
    pub kind: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// Full record of one recipe run, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRun {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_selections: Vec<DecisionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_prompt: Option<String>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipeRun {
    pub fn success(sequence: &dyn DecisionSequence, outcome: &SequenceOutcome) -> Self {
        Self {
            kind: sequence.title().to_string(),
            description: sequence.description().to_string(),
            card_selections: outcome.trace.clone(),
            final_prompt: Some(outcome.composite.trim().to_string()),
            status: RunStatus::Success,
            error: None,
        }
    }

    pub fn failure(sequence: &dyn DecisionSequence, error: impl ToString) -> Self {
        Self {
            kind: sequence.title().to_string(),
            description: sequence.description().to_string(),
            card_selections: Vec::new(),
            final_prompt: None,
            status: RunStatus::Error,
            error: Some(error.to_string()),
        }
    }
}

/// One archive document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunArchive {
    pub generated_at: String,
    /// Set when every run of the batch drew from the same deck
    pub deck: Option<DeckKind>,
    pub config: ArchiveConfig,
    pub prompts: Vec<ArchivedPrompt>,
    pub metadata: Vec<RecipeRun>,
}

impl RunArchive {
    pub fn new(deck: Option<DeckKind>, config: ArchiveConfig) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            deck,
            config,
            prompts: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Add a run; successful runs also contribute their final prompt.
    pub fn push(&mut self, run: RecipeRun) {
        if let Some(prompt) = &run.final_prompt {
            self.prompts.push(ArchivedPrompt {
                kind: run.kind.clone(),
                prompt: prompt.clone(),
            });
        }
        self.metadata.push(run);
    }

    pub fn failures(&self) -> usize {
        self.metadata
            .iter()
            .filter(|run| run.status == RunStatus::Error)
            .count()
    }

    fn file_prefix(&self) -> &'static str {
        self.deck.unwrap_or_default().archive_prefix()
    }
}

/// Writes [`RunArchive`] documents into a directory
#[derive(Debug, Clone)]
pub struct JsonRunArchive {
    dir: PathBuf,
}

impl JsonRunArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `archive` and return the path of the new file.
    pub fn write(&self, archive: &RunArchive) -> Result<PathBuf, ArchiveError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ArchiveError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let path = self
            .dir
            .join(format!("{}_{}.json", archive.file_prefix(), timestamp));
        let json = serde_json::to_string_pretty(archive)?;
        std::fs::write(&path, json).map_err(|source| ArchiveError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Archive written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AccumulatedContext, CandidateSet, DecisionType, RecipeKind, Resolution, Vote,
    };

    fn config() -> ArchiveConfig {
        ArchiveConfig {
            model: "openai/gpt-4o-mini".to_string(),
            opinion_rounds: 2,
            candidates_per_draw: 4,
        }
    }

    fn outcome() -> SequenceOutcome {
        let candidates =
            CandidateSet::new(vec!["FOREST".into(), "DESERT".into()]).unwrap();
        let votes: Vec<Vote> = [1, 1, 0, 1]
            .iter()
            .map(|&i| Vote::new("PLACER", i, &candidates).unwrap())
            .collect();
        let record = DecisionRecord::seal(
            DecisionType::new("regions"),
            candidates,
            vec![],
            votes,
            Resolution::Plurality(1),
        );
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("regions"), "DESERT").unwrap();

        SequenceOutcome {
            recipe: "simple_microsetting".to_string(),
            title: "Simple Microsetting".to_string(),
            composite: "??? DESERT with ??? ".to_string(),
            context,
            trace: vec![record],
        }
    }

    #[test]
    fn test_push_success_and_failure() {
        let simple = RecipeKind::SimpleMicrosetting.sequence();
        let complex = RecipeKind::ComplexMicrosetting.sequence();

        let mut archive = RunArchive::new(Some(DeckKind::DeckOfWorlds), config());
        archive.push(RecipeRun::success(simple.as_ref(), &outcome()));
        archive.push(RecipeRun::failure(complex.as_ref(), "HTTP 502: bad gateway"));

        assert_eq!(archive.prompts.len(), 1);
        assert_eq!(archive.prompts[0].prompt, "??? DESERT with ???");
        assert_eq!(archive.metadata.len(), 2);
        assert_eq!(archive.failures(), 1);
    }

    #[test]
    fn test_write_layout() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonRunArchive::new(dir.path().join("output"));

        let simple = RecipeKind::SimpleMicrosetting.sequence();
        let complex = RecipeKind::ComplexMicrosetting.sequence();
        let mut archive = RunArchive::new(Some(DeckKind::DeckOfWorlds), config());
        archive.push(RecipeRun::success(simple.as_ref(), &outcome()));
        archive.push(RecipeRun::failure(complex.as_ref(), "timed out"));

        let path = writer.write(&archive).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("microsettings_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "microsettings_".len() + 14 + ".json".len());

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["deck"], "deck_of_worlds");
        assert_eq!(value["config"]["opinion_rounds"], 2);
        assert_eq!(value["prompts"][0]["type"], "Simple Microsetting");

        let success = &value["metadata"][0];
        assert_eq!(success["status"], "success");
        assert_eq!(success["card_selections"][0]["card_type"], "regions");
        assert_eq!(success["card_selections"][0]["voting"]["winner_card"], "DESERT");

        let failure = &value["metadata"][1];
        assert_eq!(failure["status"], "error");
        assert_eq!(failure["error"], "timed out");
        assert!(failure.get("final_prompt").is_none());
    }

    #[test]
    fn test_story_prefix_for_mixed_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = JsonRunArchive::new(dir.path())
            .write(&RunArchive::new(None, config()))
            .unwrap();
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("story_prompts_")
        );
    }
}

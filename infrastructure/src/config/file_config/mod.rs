//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod deck;
mod output;
mod provider;

pub use debate::FileDebateConfig;
pub use deck::FileDeckConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;

use council_domain::config::validation::recipe_issues;
use council_domain::{ConfigIssue, RecipeCatalog, TemplateSequence};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// How each decision round is run
    pub debate: FileDebateConfig,
    /// Chat completions provider
    pub provider: FileProviderConfig,
    /// Deck file locations
    pub deck: FileDeckConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// User-defined recipes (`[[recipes]]`)
    pub recipes: Vec<TemplateSequence>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Debate parameters (zero rounds, zero candidates, zero timeout, unknown policy)
    /// 2. Every user-defined recipe
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.debate.validate();
        for recipe in &self.recipes {
            issues.extend(recipe_issues(recipe));
        }
        issues
    }

    /// Issues that stop a run: error-level debate settings.
    ///
    /// A broken `[[recipes]]` entry is not blocking; [`FileConfig::catalog`]
    /// leaves it out and the remaining recipes stay usable.
    pub fn blocking_issues(&self) -> Vec<ConfigIssue> {
        self.debate
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .collect()
    }

    /// Built-in recipes plus the valid user-defined ones.
    ///
    /// Recipes with error-level issues are left out.
    pub fn catalog(&self) -> RecipeCatalog {
        let usable = self
            .recipes
            .iter()
            .filter(|recipe| !recipe_issues(recipe).iter().any(ConfigIssue::is_error))
            .cloned()
            .collect();
        RecipeCatalog::with_custom(usable)
    }
}

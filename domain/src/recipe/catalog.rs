//! Recipe lookup by name

use super::{
    CharacterConcept, CircleOfFate, ComplexMicrosetting, DecisionSequence, SimpleMicrosetting,
    StorySeed, TemplateSequence,
};
use crate::core::error::DomainError;
use crate::deck::DeckKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    StorySeed,
    CharacterConcept,
    CircleOfFate,
    SimpleMicrosetting,
    ComplexMicrosetting,
}

impl RecipeKind {
    pub fn all() -> &'static [RecipeKind] {
        &[
            RecipeKind::StorySeed,
            RecipeKind::CharacterConcept,
            RecipeKind::CircleOfFate,
            RecipeKind::SimpleMicrosetting,
            RecipeKind::ComplexMicrosetting,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeKind::StorySeed => "story_seed",
            RecipeKind::CharacterConcept => "character_concept",
            RecipeKind::CircleOfFate => "circle_of_fate",
            RecipeKind::SimpleMicrosetting => "simple_microsetting",
            RecipeKind::ComplexMicrosetting => "complex_microsetting",
        }
    }

    pub fn sequence(&self) -> Arc<dyn DecisionSequence> {
        match self {
            RecipeKind::StorySeed => Arc::new(StorySeed),
            RecipeKind::CharacterConcept => Arc::new(CharacterConcept),
            RecipeKind::CircleOfFate => Arc::new(CircleOfFate),
            RecipeKind::SimpleMicrosetting => Arc::new(SimpleMicrosetting),
            RecipeKind::ComplexMicrosetting => Arc::new(ComplexMicrosetting),
        }
    }

    pub fn deck(&self) -> DeckKind {
        match self {
            RecipeKind::StorySeed | RecipeKind::CharacterConcept | RecipeKind::CircleOfFate => {
                DeckKind::StoryEngine
            }
            RecipeKind::SimpleMicrosetting | RecipeKind::ComplexMicrosetting => {
                DeckKind::DeckOfWorlds
            }
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecipeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        RecipeKind::all()
            .iter()
            .find(|kind| kind.as_str() == normalized)
            .copied()
            .ok_or_else(|| DomainError::UnknownRecipe(s.to_string()))
    }
}

/// Built-in recipes plus user-defined ones from configuration
///
/// User recipes shadow built-ins of the same name.
///
/// # Example
///
/// ```
/// use council_domain::{DeckKind, RecipeCatalog};
///
/// let catalog = RecipeCatalog::builtin();
/// assert_eq!(catalog.resolve("story_seed").unwrap().title(), "Story Seed");
/// assert!(catalog.resolve("tarot_spread").is_err());
/// assert_eq!(catalog.for_deck(DeckKind::DeckOfWorlds).len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct RecipeCatalog {
    custom: Vec<TemplateSequence>,
}

impl RecipeCatalog {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_custom(custom: Vec<TemplateSequence>) -> Self {
        Self { custom }
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn DecisionSequence>, DomainError> {
        if let Some(custom) = self.custom.iter().find(|seq| seq.name == name) {
            return Ok(Arc::new(custom.clone()));
        }
        name.parse::<RecipeKind>().map(|kind| kind.sequence())
    }

    /// Every recipe, built-ins first, in listing order.
    pub fn list(&self) -> Vec<Arc<dyn DecisionSequence>> {
        let mut recipes: Vec<Arc<dyn DecisionSequence>> = RecipeKind::all()
            .iter()
            .filter(|kind| !self.custom.iter().any(|seq| seq.name == kind.as_str()))
            .map(RecipeKind::sequence)
            .collect();
        recipes.extend(
            self.custom
                .iter()
                .cloned()
                .map(|seq| Arc::new(seq) as Arc<dyn DecisionSequence>),
        );
        recipes
    }

    /// Recipes drawing from `deck`, for batch runs.
    pub fn for_deck(&self, deck: DeckKind) -> Vec<Arc<dyn DecisionSequence>> {
        self.list()
            .into_iter()
            .filter(|seq| seq.deck() == deck)
            .collect()
    }
}

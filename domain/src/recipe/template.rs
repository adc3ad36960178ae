//! User-defined recipes
//!
//! A [`TemplateSequence`] is declared in configuration rather than code:
//!
//! ```toml
//! [[recipes]]
//! name = "rivals"
//! deck = "story_engine"
//! decisions = ["agents", "agents_2", "conflicts"]
//! template = "{agents} versus {agents_2}, {conflicts}"
//! briefing_title = "Building a RIVALRY"
//!
//! [recipes.candidate_counts]
//! conflicts = 3
//! ```

use super::{DecisionSequence, UNRESOLVED, default_briefing, framed_briefing};
use crate::debate::{AccumulatedContext, DecisionType};
use crate::deck::DeckKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recipe whose composite is a `{decision}` placeholder template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSequence {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deck: DeckKind,
    pub decisions: Vec<DecisionType>,
    /// Per-pool candidate counts; pools not listed use the run default
    #[serde(default)]
    pub candidate_counts: BTreeMap<String, usize>,
    pub template: String,
    /// When set, briefings open with this line and label decisions upper-cased
    #[serde(default)]
    pub briefing_title: Option<String>,
}

impl TemplateSequence {
    pub fn new(
        name: impl Into<String>,
        deck: DeckKind,
        decisions: Vec<DecisionType>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: String::new(),
            deck,
            decisions,
            candidate_counts: BTreeMap::new(),
            template: template.into(),
            briefing_title: None,
        }
    }

    pub fn with_candidate_count(mut self, pool: impl Into<String>, count: usize) -> Self {
        self.candidate_counts.insert(pool.into(), count);
        self
    }

    pub fn with_briefing_title(mut self, title: impl Into<String>) -> Self {
        self.briefing_title = Some(title.into());
        self
    }

    /// Placeholder names used by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                _ => rest = after,
            }
        }
        names
    }

    /// Placeholders that do not name any decision of this recipe.
    pub fn unknown_placeholders(&self) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| {
                !self
                    .decisions
                    .iter()
                    .any(|decision| decision.to_string() == *name)
            })
            .collect()
    }

    fn render(&self, context: &AccumulatedContext) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    out.push_str(context.get_str(&after[..close]).unwrap_or(UNRESOLVED));
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl DecisionSequence for TemplateSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn deck(&self) -> DeckKind {
        self.deck
    }

    fn decisions(&self) -> Vec<DecisionType> {
        self.decisions.clone()
    }

    fn candidate_count(&self, decision: &DecisionType, default: usize) -> usize {
        self.candidate_counts
            .get(decision.base())
            .copied()
            .unwrap_or(default)
    }

    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        match &self.briefing_title {
            Some(title) => framed_briefing(title, context, next, DecisionType::label),
            None => default_briefing(context, next),
        }
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        self.render(context)
    }
}

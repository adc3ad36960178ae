//! Configuration validation issues
//!
//! Settings that cannot work at all are errors; settings that work but
//! probably do not do what the user meant are warnings.
//!
//! # Examples
//!
//! ```
//! use council_domain::{DecisionType, DeckKind, TemplateSequence};
//! use council_domain::config::validation::{Severity, recipe_issues};
//!
//! let recipe = TemplateSequence::new(
//!     "rivals",
//!     DeckKind::StoryEngine,
//!     vec![DecisionType::new("agents")],
//!     "{agents} and {anchors}",
//! );
//! let issues = recipe_issues(&recipe);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].severity, Severity::Warning);
//! ```

use crate::recipe::{RecipeKind, TemplateSequence};
use std::collections::HashSet;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `debate.opinion_rounds` is zero; evaluators would vote without debating.
    ZeroOpinionRounds,
    /// A candidate count (global or per pool) is zero.
    ZeroCandidates,
    /// `debate.call_timeout_secs` is zero; every call would time out.
    ZeroTimeout,
    /// `debate.arbitration` is not a known policy.
    UnknownArbitrationPolicy,
    /// `debate.transcript_window` is zero; the arbitrator sees no debate.
    EmptyTranscriptWindow,
    /// A user recipe has no decisions.
    EmptyRecipe,
    /// A user recipe lists the same decision twice.
    DuplicateDecision,
    /// A template placeholder names no decision of its recipe.
    UnknownPlaceholder,
    /// A user recipe has the same name as a built-in one and replaces it.
    ShadowsBuiltin,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check a user-defined recipe before it is offered for runs.
pub fn recipe_issues(recipe: &TemplateSequence) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if recipe.decisions.is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyRecipe,
            format!("recipe '{}' has no decisions", recipe.name),
        ));
    }

    let mut seen = HashSet::new();
    for decision in &recipe.decisions {
        if !seen.insert(decision) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateDecision,
                format!("recipe '{}' lists '{}' more than once", recipe.name, decision),
            ));
        }
    }

    for (pool, count) in &recipe.candidate_counts {
        if *count == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroCandidates,
                format!("recipe '{}' draws zero candidates from '{}'", recipe.name, pool),
            ));
        }
    }

    for placeholder in recipe.unknown_placeholders() {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::UnknownPlaceholder,
            format!(
                "recipe '{}' template uses '{{{}}}', which is never resolved and renders as ???",
                recipe.name, placeholder
            ),
        ));
    }

    if recipe.name.parse::<RecipeKind>().is_ok() {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::ShadowsBuiltin,
            format!("recipe '{}' replaces the built-in recipe of the same name", recipe.name),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::DecisionType;
    use crate::deck::DeckKind;

    fn recipe(name: &str, decisions: &[&str], template: &str) -> TemplateSequence {
        TemplateSequence::new(
            name,
            DeckKind::StoryEngine,
            decisions
                .iter()
                .map(|d| d.parse::<DecisionType>().unwrap())
                .collect(),
            template,
        )
    }

    // ==================== Valid recipes (0 issues) ====================

    #[test]
    fn well_formed_recipe_is_valid() {
        let seq = recipe("rivals", &["agents", "agents_2"], "{agents} vs {agents_2}");
        assert!(recipe_issues(&seq).is_empty());
    }

    // ==================== Error cases ====================

    #[test]
    fn empty_recipe_is_error() {
        let issues = recipe_issues(&recipe("nothing", &[], "static text"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyRecipe);
        assert!(issues[0].is_error());
    }

    #[test]
    fn duplicate_decision_is_error() {
        let issues = recipe_issues(&recipe("twice", &["agents", "agents"], "{agents}"));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::DuplicateDecision));
    }

    #[test]
    fn zero_pool_count_is_error() {
        let seq = recipe("zero", &["agents"], "{agents}").with_candidate_count("agents", 0);
        let issues = recipe_issues(&seq);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroCandidates);
    }

    // ==================== Warning cases ====================

    #[test]
    fn builtin_name_warns() {
        let issues = recipe_issues(&recipe("story_seed", &["agents"], "{agents}"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ShadowsBuiltin);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn unknown_placeholder_warns() {
        let seq = TemplateSequence::new(
            "partial",
            DeckKind::StoryEngine,
            vec![DecisionType::new("agents")],
            "{agents} {engines_2}",
        );
        let issues = recipe_issues(&seq);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownPlaceholder);
        assert!(issues[0].message.contains("{engines_2}"));
    }
}

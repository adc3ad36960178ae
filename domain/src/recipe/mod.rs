//! Decision sequences ("recipes")
//!
//! A recipe is pure configuration: which decisions to resolve and in which
//! order, how many candidates each draws, how the accumulated context is
//! phrased for the evaluators, and how the winners are assembled into the
//! final composite. The orchestrator runs any [`DecisionSequence`] the same
//! way, so adding a recipe never touches round or orchestration logic.

mod catalog;
mod deck_of_worlds;
mod story_engine;
mod template;

pub use catalog::{RecipeCatalog, RecipeKind};
pub use deck_of_worlds::{ComplexMicrosetting, SimpleMicrosetting};
pub use story_engine::{CharacterConcept, CircleOfFate, StorySeed};
pub use template::TemplateSequence;

use crate::core::error::InvalidSequenceError;
use crate::debate::{AccumulatedContext, DecisionType};
use crate::deck::{CardPool, DeckKind};
use std::collections::HashSet;

/// Rendered in a composite for a decision that was never resolved
pub const UNRESOLVED: &str = "???";

/// Strategy describing one kind of decision sequence
pub trait DecisionSequence: Send + Sync {
    /// Registry key (e.g. `story_seed`)
    fn name(&self) -> &str;

    /// Display name (e.g. `Story Seed`)
    fn title(&self) -> &str;

    fn description(&self) -> &str;

    /// Deck the candidate pools come from
    fn deck(&self) -> DeckKind;

    /// Decisions to resolve, in order
    fn decisions(&self) -> Vec<DecisionType>;

    /// Candidates to draw for `decision`; `default` is the run-wide setting.
    fn candidate_count(&self, _decision: &DecisionType, default: usize) -> usize {
        default
    }

    /// Briefing handed to every evaluator of the round for `next`.
    ///
    /// Must only mention decisions already present in `context`.
    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        default_briefing(context, next)
    }

    /// Final composite built from every resolved decision
    fn assemble(&self, context: &AccumulatedContext) -> String;

    /// Fail-fast check run before the first draw.
    fn validate(&self, pool: &CardPool, default_count: usize) -> Result<(), InvalidSequenceError> {
        let decisions = self.decisions();
        if decisions.is_empty() {
            return Err(InvalidSequenceError::Empty {
                sequence: self.name().to_string(),
            });
        }

        let mut seen = HashSet::new();
        for decision in &decisions {
            if !seen.insert(decision) {
                return Err(InvalidSequenceError::DuplicateDecision {
                    decision: decision.to_string(),
                });
            }
            match pool.pool_for(decision) {
                None => {
                    return Err(InvalidSequenceError::UnknownPool {
                        decision: decision.to_string(),
                        pool: decision.base().to_string(),
                    });
                }
                Some([]) => {
                    return Err(InvalidSequenceError::EmptyPool {
                        decision: decision.to_string(),
                        pool: decision.base().to_string(),
                    });
                }
                Some(_) => {}
            }
            if self.candidate_count(decision, default_count) == 0 {
                return Err(InvalidSequenceError::ZeroCandidates {
                    decision: decision.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Briefing used by recipes without their own phrasing.
///
/// ```
/// use council_domain::{AccumulatedContext, DecisionType, default_briefing};
///
/// let mut context = AccumulatedContext::new();
/// assert_eq!(
///     default_briefing(&context, &DecisionType::new("agents")),
///     "Starting fresh. First selection: agents"
/// );
///
/// context.resolve(DecisionType::new("agents"), "A DETECTIVE").unwrap();
/// let briefing = default_briefing(&context, &DecisionType::new("engines"));
/// assert_eq!(briefing, "Currently selected:\n  AGENTS: A DETECTIVE\n\nNow selecting: engines");
/// ```
pub fn default_briefing(context: &AccumulatedContext, next: &DecisionType) -> String {
    if context.is_empty() {
        return format!("Starting fresh. First selection: {next}");
    }

    let mut lines = vec!["Currently selected:".to_string()];
    for (decision, winner) in context.iter() {
        lines.push(format!("  {}: {}", decision.label(), winner));
    }
    lines.push(format!("\nNow selecting: {next}"));
    lines.join("\n")
}

/// Briefing with a title line and recipe-specific labels for each decision.
pub(crate) fn framed_briefing(
    title: &str,
    context: &AccumulatedContext,
    next: &DecisionType,
    label: impl Fn(&DecisionType) -> String,
) -> String {
    let mut lines = vec![title.to_string()];
    if !context.is_empty() {
        lines.push("\nSelected so far:".to_string());
        for (decision, winner) in context.iter() {
            lines.push(format!("  {}: {}", label(decision), winner));
        }
    }
    lines.push(format!("\nNow selecting: {}", label(next)));
    lines.join("\n")
}

/// Resolved winner for `key`, or [`UNRESOLVED`].
pub(crate) fn resolved<'a>(context: &'a AccumulatedContext, key: &str) -> &'a str {
    context.get_str(key).unwrap_or(UNRESOLVED)
}

/// Parse a fixed list of decision keys.
///
/// Only used with literal, well-formed keys; a malformed key falls back to a
/// plain first-occurrence decision of the same name.
pub(crate) fn decisions_from(keys: &[&str]) -> Vec<DecisionType> {
    keys.iter()
        .map(|key| key.parse().unwrap_or_else(|_| DecisionType::new(*key)))
        .collect()
}

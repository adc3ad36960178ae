//! Recipes drawing from the Story Engine deck

use super::{DecisionSequence, decisions_from, framed_briefing, resolved};
use crate::debate::{AccumulatedContext, DecisionType};
use crate::deck::DeckKind;

/// One card of each type: the baseline story concept.
///
/// `{aspect} {agent} {engine} {anchor} {conflict}`
#[derive(Debug, Clone, Copy, Default)]
pub struct StorySeed;

impl DecisionSequence for StorySeed {
    fn name(&self) -> &str {
        "story_seed"
    }

    fn title(&self) -> &str {
        "Story Seed"
    }

    fn description(&self) -> &str {
        "Core prompt with one of each card type - a complete story concept."
    }

    fn deck(&self) -> DeckKind {
        DeckKind::StoryEngine
    }

    fn decisions(&self) -> Vec<DecisionType> {
        // character, motivation, object, obstacle, flavor
        decisions_from(&["agents", "engines", "anchors", "conflicts", "aspects"])
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        format!(
            "{} {} {} {} {}",
            resolved(context, "aspects"),
            resolved(context, "agents"),
            resolved(context, "engines"),
            resolved(context, "anchors"),
            resolved(context, "conflicts"),
        )
    }
}

/// A single character with two descriptors, a motivation and a desire.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterConcept;

impl DecisionSequence for CharacterConcept {
    fn name(&self) -> &str {
        "character_concept"
    }

    fn title(&self) -> &str {
        "Character Concept"
    }

    fn description(&self) -> &str {
        "Deep dive into a single character with motivation and desire."
    }

    fn deck(&self) -> DeckKind {
        DeckKind::StoryEngine
    }

    fn decisions(&self) -> Vec<DecisionType> {
        decisions_from(&[
            "agents",
            "aspects",
            "aspects_2",
            "engines",
            "anchors",
            "conflicts",
        ])
    }

    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        if context.is_empty() {
            return "Building a CHARACTER CONCEPT - starting with the main character.".to_string();
        }

        let mut lines = vec![
            "Building a CHARACTER CONCEPT".to_string(),
            "Selected so far:".to_string(),
        ];
        for (decision, winner) in context.iter() {
            let label = match (decision.base(), decision.ordinal()) {
                ("aspects", 1) => "ASPECT (character)".to_string(),
                ("aspects", 2) => "ASPECT (desire)".to_string(),
                _ => decision.label(),
            };
            lines.push(format!("  {label}: {winner}"));
        }

        if next.base() == "aspects" && next.ordinal() == 2 {
            lines.push("\nNow selecting: Second ASPECT (to describe the desire)".to_string());
        } else {
            lines.push(format!("\nNow selecting: {next}"));
        }
        lines.join("\n")
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        format!(
            "{} {} {} {} {} {}",
            resolved(context, "aspects"),
            resolved(context, "agents"),
            resolved(context, "engines"),
            resolved(context, "aspects_2"),
            resolved(context, "anchors"),
            resolved(context, "conflicts"),
        )
    }
}

/// Two characters locked in a mutual push-pull loop.
///
/// `#1 wants X from #2 | #2 wants Y from #1`
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleOfFate;

impl CircleOfFate {
    fn label(decision: &DecisionType) -> String {
        match decision.to_string().as_str() {
            "agents" => "CHARACTER #1".to_string(),
            "aspects" => "CHARACTER #1 descriptor".to_string(),
            "agents_2" => "CHARACTER #2".to_string(),
            "aspects_2" => "CHARACTER #2 descriptor".to_string(),
            "engines" => "What #1 wants from #2".to_string(),
            "conflicts" => "Obstacle for #1".to_string(),
            "engines_2" => "What #2 wants from #1".to_string(),
            "conflicts_2" => "Obstacle for #2".to_string(),
            _ => decision.label(),
        }
    }
}

impl DecisionSequence for CircleOfFate {
    fn name(&self) -> &str {
        "circle_of_fate"
    }

    fn title(&self) -> &str {
        "Circle of Fate"
    }

    fn description(&self) -> &str {
        "Two characters locked in mutual push-pull relationship."
    }

    fn deck(&self) -> DeckKind {
        DeckKind::StoryEngine
    }

    fn decisions(&self) -> Vec<DecisionType> {
        decisions_from(&[
            "agents",
            "aspects",
            "agents_2",
            "aspects_2",
            "engines",
            "conflicts",
            "engines_2",
            "conflicts_2",
        ])
    }

    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        framed_briefing(
            "Building a CIRCLE OF FATE - two characters in mutual push-pull",
            context,
            next,
            Self::label,
        )
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        let agent1 = resolved(context, "agents");
        let aspect1 = resolved(context, "aspects");
        let agent2 = resolved(context, "agents_2");
        let aspect2 = resolved(context, "aspects_2");

        format!(
            "{aspect1} {agent1} {engine1} {aspect2} {agent2} {conflict1} | {aspect2} {agent2} {engine2} {aspect1} {agent1} {conflict2}",
            engine1 = resolved(context, "engines"),
            conflict1 = resolved(context, "conflicts"),
            engine2 = resolved(context, "engines_2"),
            conflict2 = resolved(context, "conflicts_2"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_all(seq: &dyn DecisionSequence) -> AccumulatedContext {
        let mut context = AccumulatedContext::new();
        for decision in seq.decisions() {
            let winner = decision.label();
            context.resolve(decision, winner).unwrap();
        }
        context
    }

    #[test]
    fn test_story_seed_order_and_composite() {
        let seq = StorySeed;
        let keys: Vec<String> = seq.decisions().iter().map(|d| d.to_string()).collect();
        assert_eq!(keys, vec!["agents", "engines", "anchors", "conflicts", "aspects"]);

        let composite = seq.assemble(&resolve_all(&seq));
        assert_eq!(composite, "ASPECTS AGENTS ENGINES ANCHORS CONFLICTS");
    }

    #[test]
    fn test_story_seed_briefing_after_first_round() {
        let seq = StorySeed;
        let mut context = AccumulatedContext::new();
        context
            .resolve(DecisionType::new("agents"), "A DETECTIVE")
            .unwrap();

        let briefing = seq.render_briefing(&context, &DecisionType::new("engines"));
        assert!(briefing.contains("A DETECTIVE"));
        assert!(!briefing.to_lowercase().contains("anchors"));
    }

    #[test]
    fn test_partial_composite_marks_unresolved() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("agents"), "A KING").unwrap();
        assert_eq!(StorySeed.assemble(&context), "??? A KING ??? ??? ???");
    }

    #[test]
    fn test_character_concept_briefing_labels() {
        let seq = CharacterConcept;
        let context = AccumulatedContext::new();
        assert!(
            seq.render_briefing(&context, &DecisionType::new("agents"))
                .starts_with("Building a CHARACTER CONCEPT - starting")
        );

        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("agents"), "A THIEF").unwrap();
        context.resolve(DecisionType::new("aspects"), "HAUNTED").unwrap();
        let briefing = seq.render_briefing(&context, &DecisionType::nth("aspects", 2));
        assert!(briefing.contains("  AGENTS: A THIEF"));
        assert!(briefing.contains("  ASPECT (character): HAUNTED"));
        assert!(briefing.ends_with("Second ASPECT (to describe the desire)"));
    }

    #[test]
    fn test_circle_of_fate_is_a_loop() {
        let seq = CircleOfFate;
        assert_eq!(seq.decisions().len(), 8);

        let composite = seq.assemble(&resolve_all(&seq));
        let (forward, backward) = composite.split_once(" | ").unwrap();
        assert_eq!(
            forward,
            "ASPECTS AGENTS ENGINES ASPECTS_2 AGENTS_2 CONFLICTS"
        );
        assert_eq!(
            backward,
            "ASPECTS_2 AGENTS_2 ENGINES_2 ASPECTS AGENTS CONFLICTS_2"
        );
    }

    #[test]
    fn test_circle_of_fate_briefing() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("agents"), "A KING").unwrap();
        let briefing = CircleOfFate.render_briefing(&context, &DecisionType::new("aspects"));
        assert!(briefing.contains("  CHARACTER #1: A KING"));
        assert!(briefing.ends_with("Now selecting: CHARACTER #1 descriptor"));
    }
}

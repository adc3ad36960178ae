//! Recipes drawing from the Deck of Worlds

use super::{DecisionSequence, decisions_from, framed_briefing, resolved};
use crate::debate::{AccumulatedContext, DecisionType};
use crate::deck::DeckKind;

/// The standard six-step worldbuilding unit.
///
/// Region is the hub; landmark, namesake, origin (past), attribute
/// (present) and advent (future hook) hang off it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMicrosetting;

impl SimpleMicrosetting {
    fn label(decision: &DecisionType) -> String {
        match decision.to_string().as_str() {
            "regions" => "REGION (main terrain)".to_string(),
            "landmarks" => "LANDMARK (point of interest)".to_string(),
            "namesakes" => "NAMESAKE (in-world nickname)".to_string(),
            "origins" => "ORIGIN (past event)".to_string(),
            "attributes" => "ATTRIBUTE (present feature)".to_string(),
            "advents" => "ADVENT (future hook)".to_string(),
            _ => decision.label(),
        }
    }
}

impl DecisionSequence for SimpleMicrosetting {
    fn name(&self) -> &str {
        "simple_microsetting"
    }

    fn title(&self) -> &str {
        "Simple Microsetting"
    }

    fn description(&self) -> &str {
        "Basic worldbuilding unit with 6 card types from Deck of Worlds."
    }

    fn deck(&self) -> DeckKind {
        DeckKind::DeckOfWorlds
    }

    fn decisions(&self) -> Vec<DecisionType> {
        decisions_from(&[
            "regions",
            "landmarks",
            "namesakes",
            "origins",
            "attributes",
            "advents",
        ])
    }

    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        framed_briefing(
            "Building a SIMPLE MICROSETTING (Deck of Worlds)",
            context,
            next,
            Self::label,
        )
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        format!(
            "{} {} with {} | Origin: {} | Now: {} | Hook: {}",
            resolved(context, "namesakes"),
            resolved(context, "regions"),
            resolved(context, "landmarks"),
            resolved(context, "origins"),
            resolved(context, "attributes"),
            resolved(context, "advents"),
        )
    }
}

/// A richer unit with two landmarks, two namesakes and two attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexMicrosetting;

impl ComplexMicrosetting {
    fn label(decision: &DecisionType) -> String {
        match decision.to_string().as_str() {
            "regions" => "REGION (main terrain)".to_string(),
            "landmarks" => "LANDMARK #1".to_string(),
            "landmarks_2" => "LANDMARK #2".to_string(),
            "namesakes" => "NAMESAKE #1".to_string(),
            "namesakes_2" => "NAMESAKE #2".to_string(),
            "origins" => "ORIGIN (past event)".to_string(),
            "attributes" => "ATTRIBUTE #1".to_string(),
            "attributes_2" => "ATTRIBUTE #2".to_string(),
            "advents" => "ADVENT (future hook)".to_string(),
            _ => decision.label(),
        }
    }
}

impl DecisionSequence for ComplexMicrosetting {
    fn name(&self) -> &str {
        "complex_microsetting"
    }

    fn title(&self) -> &str {
        "Complex Microsetting"
    }

    fn description(&self) -> &str {
        "Richer worldbuilding with multiple landmarks and attributes."
    }

    fn deck(&self) -> DeckKind {
        DeckKind::DeckOfWorlds
    }

    fn decisions(&self) -> Vec<DecisionType> {
        decisions_from(&[
            "regions",
            "landmarks",
            "landmarks_2",
            "namesakes",
            "namesakes_2",
            "origins",
            "attributes",
            "attributes_2",
            "advents",
        ])
    }

    fn render_briefing(&self, context: &AccumulatedContext, next: &DecisionType) -> String {
        framed_briefing(
            "Building a COMPLEX MICROSETTING (Deck of Worlds)\n\
             This includes multiple landmarks, namesakes, and attributes.",
            context,
            next,
            Self::label,
        )
    }

    fn assemble(&self, context: &AccumulatedContext) -> String {
        format!(
            "{} {} {} with {} and {} | Origin: {} | Now: {}, {} | Hook: {}",
            resolved(context, "namesakes"),
            resolved(context, "regions"),
            resolved(context, "namesakes_2"),
            resolved(context, "landmarks"),
            resolved(context, "landmarks_2"),
            resolved(context, "origins"),
            resolved(context, "attributes"),
            resolved(context, "attributes_2"),
            resolved(context, "advents"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_microsetting_composite() {
        let mut context = AccumulatedContext::new();
        for (key, value) in [
            ("regions", "FOREST"),
            ("landmarks", "A RUINED TOWER"),
            ("namesakes", "WHISPERING"),
            ("origins", "A GREAT FIRE"),
            ("attributes", "BANDITS"),
            ("advents", "A COMET"),
        ] {
            context.resolve(key.parse().unwrap(), value).unwrap();
        }

        assert_eq!(
            SimpleMicrosetting.assemble(&context),
            "WHISPERING FOREST with A RUINED TOWER | Origin: A GREAT FIRE | Now: BANDITS | Hook: A COMET"
        );
    }

    #[test]
    fn test_simple_microsetting_first_briefing() {
        let briefing = SimpleMicrosetting
            .render_briefing(&AccumulatedContext::new(), &DecisionType::new("regions"));
        assert_eq!(
            briefing,
            "Building a SIMPLE MICROSETTING (Deck of Worlds)\n\nNow selecting: REGION (main terrain)"
        );
    }

    #[test]
    fn test_complex_microsetting_unresolved_composite() {
        let composite = ComplexMicrosetting.assemble(&AccumulatedContext::new());
        assert_eq!(
            composite,
            "??? ??? ??? with ??? and ??? | Origin: ??? | Now: ???, ??? | Hook: ???"
        );
    }

    #[test]
    fn test_complex_microsetting_labels_second_draws() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("regions"), "DESERT").unwrap();
        context.resolve(DecisionType::new("landmarks"), "AN OASIS").unwrap();

        let briefing =
            ComplexMicrosetting.render_briefing(&context, &DecisionType::nth("landmarks", 2));
        assert!(briefing.contains("  LANDMARK #1: AN OASIS"));
        assert!(briefing.ends_with("Now selecting: LANDMARK #2"));
        assert_eq!(ComplexMicrosetting.decisions().len(), 9);
    }
}

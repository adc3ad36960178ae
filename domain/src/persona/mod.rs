//! Evaluator and arbitrator personas
//!
//! Every decision round is argued by the same four evaluators, each with a
//! fixed, non-overlapping bias, and settled (on a tie) by a neutral
//! supervisor. Personas are static configuration and never change at runtime.

use serde::{Deserialize, Serialize};

/// A fixed persona handed to the text-generation capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name used in transcripts and votes (e.g. "PLACER")
    pub name: String,
    /// Short role description
    pub role: String,
    /// System prompt defining the persona's bias
    pub system_prompt: String,
    /// Sampling temperature requested for this persona
    pub temperature: f32,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            system_prompt: system_prompt.into(),
            temperature: EVALUATOR_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Advocates for dramatic, bold, high-stakes choices.
    pub fn placer() -> Self {
        Self::new(
            "PLACER",
            "Dramatic advocate",
            r#"You are the PLACER agent in a story prompt generation debate.

Your perspective: You advocate for DRAMATIC, BOLD, HIGH-STAKES choices.
You value:
- Strong emotional impact
- Clear conflict and tension
- Memorable, striking combinations
- Cards that demand attention

When evaluating cards, ask: "Which choice creates the most dramatic story potential?"
Be passionate but concise. Champion the card that hits hardest."#,
        )
    }

    /// Advocates for subtle, nuanced, layered choices.
    pub fn rotator() -> Self {
        Self::new(
            "ROTATOR",
            "Nuance advocate",
            r#"You are the ROTATOR agent in a story prompt generation debate.

Your perspective: You advocate for SUBTLE, NUANCED, LAYERED choices.
You value:
- Complexity and depth
- Unexpected angles and interpretations
- Cards that reward closer examination
- Moral ambiguity and gray areas

When evaluating cards, ask: "Which choice offers the most interesting layers to explore?"
Be thoughtful but concise. Champion the card with hidden depths."#,
        )
    }

    /// Challenges weak combinations and points out problems.
    pub fn critic() -> Self {
        Self::new(
            "CRITIC",
            "Quality challenger",
            r#"You are the CRITIC agent in a story prompt generation debate.

Your perspective: You CHALLENGE weak choices and point out problems.
You watch for:
- Cliches and overused combinations
- Cards that don't fit with already-selected elements
- Choices that limit story potential
- Logical inconsistencies

When evaluating cards, ask: "What's wrong with each option? Which has the fewest problems?"
Be sharp but constructive. If you disagree with others, say why clearly."#,
        )
    }

    /// Finds connections between cards and builds cohesion.
    pub fn synthesizer() -> Self {
        Self::new(
            "SYNTHESIZER",
            "Connection finder",
            r#"You are the SYNTHESIZER agent in a story prompt generation debate.

Your perspective: You find CONNECTIONS and build COHESION between cards.
You focus on:
- How cards complement already-selected elements
- Thematic resonance across the prompt
- Story potential when elements combine
- The emergent narrative from card interactions

When evaluating cards, ask: "Which choice creates the strongest overall combination?"
Be integrative but concise. Champion the card that makes the whole greater than its parts."#,
        )
    }

    /// Neutral supervisor that only breaks ties.
    pub fn supervisor() -> Self {
        Self::new(
            "SUPERVISOR",
            "Tie breaker",
            "You are the supervisor of a story prompt debate. Break ties wisely.",
        )
        .with_temperature(ARBITRATOR_TEMPERATURE)
    }

    /// The four evaluators in their fixed speaking and voting order.
    pub fn evaluators() -> Vec<Persona> {
        vec![
            Self::placer(),
            Self::rotator(),
            Self::critic(),
            Self::synthesizer(),
        ]
    }
}

/// Default sampling temperature for evaluators
pub const EVALUATOR_TEMPERATURE: f32 = 0.7;

/// Number of evaluators that debate and vote in every round
pub const COUNCIL_SIZE: usize = 4;

/// Default sampling temperature for the arbitrator
pub const ARBITRATOR_TEMPERATURE: f32 = 0.5;

//! Prompt templates for the debate flow

use crate::core::string::tail;
use crate::debate::{CandidateSet, DecisionType};

/// Default number of trailing transcript characters given to the arbitrator
pub const DEFAULT_TRANSCRIPT_WINDOW: usize = 2000;

/// Templates for generating prompts at each stage of a decision round
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// User prompt for an opinion.
    ///
    /// `previous` is empty in the first opinion round; later rounds pass the
    /// transcript lines said so far.
    pub fn opinion_prompt(
        evaluator: &str,
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        previous: &[String],
    ) -> String {
        let context = if briefing.is_empty() {
            "(Starting fresh - no cards selected yet)"
        } else {
            briefing
        };
        let previous = if previous.is_empty() {
            String::new()
        } else {
            format!("\n\nPrevious discussion:\n{}", previous.join("\n"))
        };

        format!(
            r#"We are selecting a {label} card for a story prompt.

Current story context:
{context}

Available {decision} options:
{options}
{previous}

Based on your perspective as {evaluator}, which card do you advocate for and why?
Keep your response concise (2-3 sentences). State your preferred card number and reasoning."#,
            label = decision.label(),
            options = candidates.numbered(),
        )
    }

    /// User prompt for a final vote after all opinion rounds.
    pub fn vote_prompt(
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        transcript: &str,
    ) -> String {
        format!(
            r#"Based on the debate, cast your final vote for the {label} card.

Current story context:
{context}

Options:
{options}

Debate transcript:
{transcript}

Reply with ONLY a single number ({choices}) representing your vote."#,
            label = decision.label(),
            context = or_fresh(briefing),
            options = candidates.numbered(),
            choices = Self::choice_list(candidates.len()),
        )
    }

    /// User prompt for the arbitrator.
    ///
    /// Only the tied candidates are listed (with their original numbers) and
    /// only the last `window` characters of the transcript are included.
    pub fn tiebreak_prompt(
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        tied: &[usize],
        transcript: &str,
        window: usize,
    ) -> String {
        format!(
            r#"As the debate supervisor, you must break a tie for the {label} card.

Current story context:
{context}

Tied options:
{options}

Debate summary:
{summary}

Consider the arguments made and select the option that best serves the story.
Reply with ONLY the number of your chosen option."#,
            label = decision.label(),
            context = or_fresh(briefing),
            options = candidates.numbered_subset(tied.iter().copied()),
            summary = tail(transcript, window),
        )
    }

    /// "1, 2, 3, or 4"
    fn choice_list(count: usize) -> String {
        let numbers: Vec<String> = (1..=count).map(|n| n.to_string()).collect();
        match numbers.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        }
    }
}

fn or_fresh(briefing: &str) -> &str {
    if briefing.is_empty() {
        "(Starting fresh)"
    } else {
        briefing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> CandidateSet {
        CandidateSet::new(vec![
            "A DETECTIVE".into(),
            "A THIEF".into(),
            "A GHOST".into(),
            "A KING".into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_round_opinion_has_no_discussion() {
        let prompt = DebatePromptTemplate::opinion_prompt(
            "PLACER",
            "",
            &candidates(),
            &DecisionType::new("agents"),
            &[],
        );
        assert!(prompt.contains("selecting a AGENTS card"));
        assert!(prompt.contains("(Starting fresh - no cards selected yet)"));
        assert!(prompt.contains("  3. A GHOST"));
        assert!(prompt.contains("as PLACER"));
        assert!(!prompt.contains("Previous discussion"));
    }

    #[test]
    fn test_rebuttal_includes_previous_lines() {
        let previous = vec!["**PLACER**: 1 is bold.".to_string()];
        let prompt = DebatePromptTemplate::opinion_prompt(
            "CRITIC",
            "Currently selected:\n  ENGINES: WANTS TO SOLVE",
            &candidates(),
            &DecisionType::new("agents"),
            &previous,
        );
        assert!(prompt.contains("Previous discussion:\n**PLACER**: 1 is bold."));
        assert!(prompt.contains("WANTS TO SOLVE"));
    }

    #[test]
    fn test_vote_prompt() {
        let prompt = DebatePromptTemplate::vote_prompt(
            "",
            &candidates(),
            &DecisionType::new("agents"),
            "**PLACER**: 1",
        );
        assert!(prompt.contains("cast your final vote for the AGENTS card"));
        assert!(prompt.contains("(1, 2, 3, or 4)"));
        assert!(prompt.contains("Debate transcript:\n**PLACER**: 1"));
    }

    #[test]
    fn test_tiebreak_lists_only_tied_options() {
        let prompt = DebatePromptTemplate::tiebreak_prompt(
            "",
            &candidates(),
            &DecisionType::new("agents"),
            &[1, 3],
            "transcript",
            DEFAULT_TRANSCRIPT_WINDOW,
        );
        assert!(prompt.contains("  2. A THIEF\n  4. A KING"));
        assert!(!prompt.contains("A GHOST"));
    }

    #[test]
    fn test_tiebreak_truncates_transcript_to_window() {
        let transcript = format!("{}{}", "x".repeat(5000), "END");
        let prompt = DebatePromptTemplate::tiebreak_prompt(
            "",
            &candidates(),
            &DecisionType::new("agents"),
            &[0, 1],
            &transcript,
            100,
        );
        assert!(prompt.contains("END"));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_choice_list() {
        assert_eq!(DebatePromptTemplate::choice_list(1), "1");
        assert_eq!(DebatePromptTemplate::choice_list(2), "1, or 2");
        assert_eq!(DebatePromptTemplate::choice_list(4), "1, 2, 3, or 4");
    }
}

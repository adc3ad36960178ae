//! Opinions voiced during the debate phase of a round.

use serde::{Deserialize, Serialize};

/// A single evaluator's stance in one opinion round.
///
/// Immutable once produced; later rounds rebut it, they never revise it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
    /// Persona name of the evaluator (e.g. "PLACER")
    #[serde(rename = "agent")]
    pub evaluator: String,
    /// Free-text justification
    #[serde(rename = "opinion")]
    pub text: String,
    /// 0-based index of the candidate the opinion argues for, if one was named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<usize>,
}

impl Opinion {
    pub fn new(evaluator: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            evaluator: evaluator.into(),
            text: text.into(),
            preferred: None,
        }
    }

    pub fn with_preferred(mut self, index: Option<usize>) -> Self {
        self.preferred = index;
        self
    }

    /// Line as it appears in the shared debate transcript.
    pub fn transcript_line(&self) -> String {
        format!("**{}**: {}", self.evaluator, self.text)
    }
}

/// All opinions voiced in one opinion round, in persona order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionRound {
    /// Round number (1-indexed)
    pub round: usize,
    pub opinions: Vec<Opinion>,
}

impl OpinionRound {
    pub fn new(round: usize, opinions: Vec<Opinion>) -> Self {
        Self { round, opinions }
    }
}

/// Newline-joined transcript of every opinion across the given rounds.
pub fn transcript<'a>(opinions: impl IntoIterator<Item = &'a Opinion>) -> String {
    opinions
        .into_iter()
        .map(Opinion::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

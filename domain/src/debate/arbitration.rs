//! Arbitration policy
//!
//! Decides what happens when the arbitrator's reply names none of the tied
//! candidates.

use super::parsing::{parse_tiebreak_choice, parse_tiebreak_index};
use serde::{Deserialize, Serialize};

/// How an unparseable tie-break reply is handled
///
/// # Example
///
/// ```
/// use council_domain::ArbitrationPolicy;
///
/// let tied = [1, 3];
/// assert_eq!(ArbitrationPolicy::Lenient.settle("I pick 4", &tied), Some(3));
/// assert_eq!(ArbitrationPolicy::Lenient.settle("Both are strong", &tied), Some(1));
/// assert_eq!(ArbitrationPolicy::Strict.settle("Both are strong", &tied), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArbitrationPolicy {
    /// Fall back to the first tied candidate (always terminates)
    #[default]
    Lenient,
    /// Treat an unparseable reply as a failed arbitration
    Strict,
}

impl ArbitrationPolicy {
    /// Winner among `tied` for the arbitrator's `response`.
    ///
    /// `None` only under [`ArbitrationPolicy::Strict`] (or for an empty
    /// `tied` set, which a tally never produces).
    pub fn settle(&self, response: &str, tied: &[usize]) -> Option<usize> {
        match self {
            ArbitrationPolicy::Lenient => {
                (!tied.is_empty()).then(|| parse_tiebreak_index(response, tied))
            }
            ArbitrationPolicy::Strict => parse_tiebreak_choice(response, tied),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ArbitrationPolicy::Lenient => "lenient (fallback to first tied candidate)",
            ArbitrationPolicy::Strict => "strict (unparseable tie-break fails the run)",
        }
    }
}

impl std::fmt::Display for ArbitrationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArbitrationPolicy::Lenient => write!(f, "lenient"),
            ArbitrationPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for ArbitrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" | "fallback" => Ok(ArbitrationPolicy::Lenient),
            "strict" => Ok(ArbitrationPolicy::Strict),
            _ => Err(format!(
                "Unknown arbitration policy: {}. Valid: lenient, strict",
                s
            )),
        }
    }
}

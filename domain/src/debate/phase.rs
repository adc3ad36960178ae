//! Decision round state machine
//!
//! ```text
//! DRAWN ─▶ OPINED(1) ─▶ … ─▶ OPINED(R) ─▶ VOTED ─▶ TALLIED ─┬─▶ RESOLVED ──────────────┬─▶ FINALIZED
//!                                                            └─▶ TIE_DETECTED ─▶ ARBITRATED ┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a decision round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "round")]
pub enum RoundPhase {
    /// Candidates fixed; nothing said yet
    Drawn,
    /// Opinion round `k` (1-based) complete
    Opined(usize),
    /// Every evaluator has voted
    Voted,
    /// Votes counted
    Tallied,
    /// Unique maximum; no arbitration needed
    Resolved,
    /// Two or more candidates share the maximum
    TieDetected,
    /// Arbitrator picked among the tied candidates
    Arbitrated,
    /// Record sealed
    Finalized,
}

impl RoundPhase {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(&self, next: &RoundPhase) -> bool {
        use RoundPhase::*;
        match (self, next) {
            (Drawn, Opined(1)) => true,
            (Opined(k), Opined(j)) => *j == k + 1,
            (Opined(_), Voted) => true,
            (Voted, Tallied) => true,
            (Tallied, Resolved | TieDetected) => true,
            (TieDetected, Arbitrated) => true,
            (Resolved | Arbitrated, Finalized) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Finalized)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Drawn => write!(f, "DRAWN"),
            RoundPhase::Opined(k) => write!(f, "OPINED({k})"),
            RoundPhase::Voted => write!(f, "VOTED"),
            RoundPhase::Tallied => write!(f, "TALLIED"),
            RoundPhase::Resolved => write!(f, "RESOLVED"),
            RoundPhase::TieDetected => write!(f, "TIE_DETECTED"),
            RoundPhase::Arbitrated => write!(f, "ARBITRATED"),
            RoundPhase::Finalized => write!(f, "FINALIZED"),
        }
    }
}

/// The part of a round in which an external capability call was in flight.
///
/// Carried by errors so a caller knows which decision and which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStage {
    Opining { round: usize },
    Voting,
    Arbitrating,
}

impl fmt::Display for RoundStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStage::Opining { round } => write!(f, "opinion round {round}"),
            RoundStage::Voting => write!(f, "voting"),
            RoundStage::Arbitrating => write!(f, "arbitration"),
        }
    }
}

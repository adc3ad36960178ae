//! Debate-and-selection domain
//!
//! This module contains the core concepts for resolving "pick one of N"
//! decisions with several biased evaluators.
//!
//! # Core Concepts
//!
//! ## Decision Round
//! Candidates are drawn, every evaluator voices an opinion over one or more
//! opinion rounds, every evaluator votes, votes are tallied, and a tie on the
//! maximum count is settled by an arbitrator.
//!
//! ## Decision Sequence
//! An ordered list of decision rounds. Each round's winner is appended to the
//! [`AccumulatedContext`] that briefs every later round.
//!
//! # Round Lifecycle
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  DRAWN        candidates fixed                                    │
//! │    ↓                                                              │
//! │  OPINED(k)    k = 1..R, rebuttals see earlier opinions            │
//! │    ↓                                                              │
//! │  VOTED        one vote per evaluator, after all opinions          │
//! │    ↓                                                              │
//! │  TALLIED      plurality count                                     │
//! │    ↓                                                              │
//! │  RESOLVED  or  TIE_DETECTED → ARBITRATED                          │
//! │    ↓                                                              │
//! │  FINALIZED    DecisionRecord sealed                               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod arbitration;
pub mod candidate;
pub mod context;
pub mod decision_type;
pub mod opinion;
pub mod parsing;
pub mod phase;
pub mod record;
pub mod vote;

// Re-export main types
pub use arbitration::ArbitrationPolicy;
pub use candidate::{Candidate, CandidateSet};
pub use context::AccumulatedContext;
pub use decision_type::DecisionType;
pub use opinion::{Opinion, OpinionRound, transcript};
pub use parsing::{parse_preferred_index, parse_tiebreak_choice, parse_tiebreak_index, parse_vote_index};
pub use phase::{RoundPhase, RoundStage};
pub use record::{DecisionRecord, Resolution, VotingOutcome};
pub use vote::{Tally, Vote};

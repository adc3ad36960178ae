//! Domain layer for story-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council of four biased evaluators resolves "pick one of N" decisions:
//!
//! - **Debate**: every evaluator voices an opinion, over one or more rounds
//! - **Vote**: every evaluator picks one candidate; plurality wins
//! - **Arbitration**: a neutral supervisor settles ties among the leaders
//!
//! ## Recipes
//!
//! A recipe ([`DecisionSequence`]) chains decisions so that each winner
//! briefs the following rounds, then assembles all winners into one
//! composite prompt.

pub mod config;
pub mod core;
pub mod debate;
pub mod deck;
pub mod persona;
pub mod prompt;
pub mod recipe;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::{ContextError, DomainError, InvalidSequenceError};
pub use debate::{
    AccumulatedContext, ArbitrationPolicy, Candidate, CandidateSet, DecisionRecord, DecisionType,
    Opinion, OpinionRound, Resolution, RoundPhase, RoundStage, Tally, Vote, VotingOutcome,
    parse_preferred_index, parse_tiebreak_choice, parse_tiebreak_index, parse_vote_index,
    transcript,
};
pub use deck::{CardPool, DeckKind};
pub use persona::Persona;
pub use prompt::{DEFAULT_TRANSCRIPT_WINDOW, DebatePromptTemplate};
pub use recipe::{
    DecisionSequence, RecipeCatalog, RecipeKind, TemplateSequence, UNRESOLVED, default_briefing,
};

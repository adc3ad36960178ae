//! Application layer for story-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod council;
pub mod ports;
pub mod sampling;
pub mod use_cases;

// Re-export commonly used types
pub use config::DebateParams;
pub use council::{Arbitrator, Evaluator};
pub use ports::{
    deck_source::{DeckSource, DeckSourceError, InMemoryDeckSource},
    decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger},
    llm_gateway::{CapabilityError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use sampling::{CandidateSource, entropy_seed};
pub use use_cases::run_decision::{DecisionError, RunDecisionInput, RunDecisionUseCase};
pub use use_cases::run_sequence::{
    RunSequenceError, RunSequenceInput, RunSequenceUseCase, SequenceOutcome,
};

//! Run Sequence use case
//!
//! Drives a recipe: for each decision in order it draws candidates, briefs
//! the council with the winners so far, runs a round, and appends the
//! winner to the accumulated context. The composite is assembled once every
//! decision has resolved.

use crate::config::DebateParams;
use crate::ports::decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::sampling::CandidateSource;
use crate::use_cases::run_decision::{DecisionError, RunDecisionInput, RunDecisionUseCase};
use crate::use_cases::shared::check_cancelled;
use council_domain::{
    AccumulatedContext, CardPool, ContextError, DecisionRecord, DecisionSequence,
    InvalidSequenceError, Persona,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while running a sequence
#[derive(Error, Debug)]
pub enum RunSequenceError {
    #[error("Invalid sequence: {0}")]
    Invalid(#[from] InvalidSequenceError),

    #[error(transparent)]
    Decision(DecisionError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunSequenceError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunSequenceError::Cancelled)
    }
}

impl From<DecisionError> for RunSequenceError {
    fn from(error: DecisionError) -> Self {
        match error {
            DecisionError::Cancelled => RunSequenceError::Cancelled,
            other => RunSequenceError::Decision(other),
        }
    }
}

/// Input for the RunSequence use case
#[derive(Clone)]
pub struct RunSequenceInput {
    pub sequence: Arc<dyn DecisionSequence>,
    /// Pools of the sequence's deck, loaded up front
    pub pool: CardPool,
}

impl RunSequenceInput {
    pub fn new(sequence: Arc<dyn DecisionSequence>, pool: CardPool) -> Self {
        Self { sequence, pool }
    }
}

/// Result of a completed sequence
#[derive(Debug, Clone, Serialize)]
pub struct SequenceOutcome {
    pub recipe: String,
    pub title: String,
    /// The assembled prompt
    pub composite: String,
    pub context: AccumulatedContext,
    /// One record per decision, in sequence order
    pub trace: Vec<DecisionRecord>,
}

/// Use case for running a whole decision sequence
pub struct RunSequenceUseCase<G: LlmGateway + 'static> {
    round: RunDecisionUseCase<G>,
    logger: Arc<dyn DecisionLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunSequenceUseCase<G> {
    pub fn new(gateway: Arc<G>, params: DebateParams) -> Self {
        Self {
            round: RunDecisionUseCase::new(gateway, params),
            logger: Arc::new(NoDecisionLogger),
            cancellation_token: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_personas(mut self, evaluators: Vec<Persona>, arbitrator: Persona) -> Self {
        self.round = self.round.with_personas(evaluators, arbitrator);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.round = self.round.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.round = self.round.with_cancellation(token.clone());
        self.cancellation_token = Some(token);
        self
    }

    // ==================== Execution ====================

    /// Execute the sequence with default (no-op) progress
    pub async fn execute(&self, input: RunSequenceInput) -> Result<SequenceOutcome, RunSequenceError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the sequence with progress callbacks
    ///
    /// The sequence is validated against the pool before any capability
    /// call. The first failing round aborts the run; no partial outcome is
    /// returned.
    pub async fn execute_with_progress(
        &self,
        input: RunSequenceInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SequenceOutcome, RunSequenceError> {
        check_cancelled(&self.cancellation_token)?;

        let RunSequenceInput { sequence, pool } = input;
        let params = self.round.params();
        sequence.validate(&pool, params.candidates_per_draw)?;
        self.round.check_council()?;

        let mut source = match params.seed {
            Some(seed) => CandidateSource::with_seed(seed),
            None => CandidateSource::from_entropy_mix(),
        };

        let decisions = sequence.decisions();
        let total = decisions.len();
        info!("Running {} ({} decisions)", sequence.title(), total);
        self.logger.log(DecisionEvent::new(
            "sequence_started",
            serde_json::json!({
                "recipe": sequence.name(),
                "deck": sequence.deck(),
                "decisions": decisions.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
                "seed": params.seed,
            }),
        ));
        progress.on_sequence_start(sequence.name(), total);

        let mut context = AccumulatedContext::new();
        let mut trace = Vec::with_capacity(total);

        for (position, decision) in decisions.into_iter().enumerate() {
            check_cancelled(&self.cancellation_token)?;

            let count = sequence.candidate_count(&decision, params.candidates_per_draw);
            let candidates = pool
                .pool_for(&decision)
                .and_then(|cards| source.draw(cards, count))
                .ok_or_else(|| InvalidSequenceError::EmptyPool {
                    decision: decision.to_string(),
                    pool: decision.base().to_string(),
                })?;
            progress.on_decision_start(&decision, &candidates, position + 1, total);

            let briefing = sequence.render_briefing(&context, &decision);
            debug!(decision = %decision, briefing = %briefing, "Briefing");

            let record = self
                .round
                .execute_with_progress(
                    RunDecisionInput::new(decision.clone(), candidates).with_briefing(briefing),
                    progress,
                )
                .await?;

            context.resolve(decision, record.winner().label())?;
            trace.push(record);
        }

        let composite = sequence.assemble(&context);
        info!("Composite: {}", composite);
        self.logger.log(DecisionEvent::new(
            "sequence_completed",
            serde_json::json!({
                "recipe": sequence.name(),
                "composite": composite,
                "context": context,
            }),
        ));
        progress.on_sequence_complete(sequence.name(), &composite);

        Ok(SequenceOutcome {
            recipe: sequence.name().to_string(),
            title: sequence.title().to_string(),
            composite,
            context,
            trace,
        })
    }
}

//! Run Decision use case
//!
//! Runs one council round over a drawn candidate set:
//!
//! ```text
//! DRAWN -> OPINED(1) .. OPINED(R) -> VOTED -> TALLIED -+-> RESOLVED ---+-> FINALIZED
//!                                                      +-> TIE_DETECTED -> ARBITRATED
//! ```
//!
//! A capability failure at any stage aborts the round; no partial record
//! is produced.

use crate::config::DebateParams;
use crate::council::{Arbitrator, Evaluator};
use crate::ports::decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger};
use crate::ports::llm_gateway::{CapabilityError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::check_cancelled;
use council_domain::{
    CandidateSet, DecisionRecord, DecisionType, Opinion, OpinionRound, Persona, Resolution,
    RoundPhase, RoundStage, Tally, Vote, transcript,
};
use council_domain::persona::COUNCIL_SIZE;
use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while running a decision round
#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Capability failed during {stage} of '{decision}': {source}")]
    Capability {
        decision: DecisionType,
        stage: RoundStage,
        #[source]
        source: CapabilityError,
    },

    #[error("Arbitrator did not name one of the tied candidates {tied:?} for '{decision}'")]
    TieArbitrationExhausted {
        decision: DecisionType,
        tied: Vec<usize>,
    },

    #[error("Council needs {expected} evaluators, got {actual}")]
    InvalidCouncil { expected: usize, actual: usize },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DecisionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DecisionError::Cancelled)
    }
}

/// Input for the RunDecision use case
#[derive(Debug, Clone)]
pub struct RunDecisionInput {
    pub decision: DecisionType,
    pub candidates: CandidateSet,
    /// Rendered context of the decisions resolved so far
    pub briefing: String,
}

impl RunDecisionInput {
    pub fn new(decision: DecisionType, candidates: CandidateSet) -> Self {
        Self {
            decision,
            candidates,
            briefing: String::new(),
        }
    }

    pub fn with_briefing(mut self, briefing: impl Into<String>) -> Self {
        self.briefing = briefing.into();
        self
    }
}

/// Use case for running one decision round
pub struct RunDecisionUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: DebateParams,
    evaluators: Vec<Persona>,
    arbitrator: Persona,
    logger: Arc<dyn DecisionLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunDecisionUseCase<G> {
    /// Council of the four default evaluators and the supervisor.
    pub fn new(gateway: Arc<G>, params: DebateParams) -> Self {
        Self {
            gateway,
            params,
            evaluators: Persona::evaluators(),
            arbitrator: Persona::supervisor(),
            logger: Arc::new(NoDecisionLogger),
            cancellation_token: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_personas(mut self, evaluators: Vec<Persona>, arbitrator: Persona) -> Self {
        self.evaluators = evaluators;
        self.arbitrator = arbitrator;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &DebateParams {
        &self.params
    }

    /// Every round is debated and voted by exactly [`COUNCIL_SIZE`] evaluators.
    pub fn check_council(&self) -> Result<(), DecisionError> {
        if self.evaluators.len() == COUNCIL_SIZE {
            Ok(())
        } else {
            Err(DecisionError::InvalidCouncil {
                expected: COUNCIL_SIZE,
                actual: self.evaluators.len(),
            })
        }
    }

    // ==================== Execution ====================

    /// Execute the round with default (no-op) progress
    pub async fn execute(&self, input: RunDecisionInput) -> Result<DecisionRecord, DecisionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the round with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDecisionInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DecisionRecord, DecisionError> {
        check_cancelled(&self.cancellation_token)?;
        self.check_council()?;

        let RunDecisionInput {
            decision,
            candidates,
            briefing,
        } = input;
        let mut phase = RoundPhase::Drawn;
        info!(
            "Deciding {} among {} candidates",
            decision.label(),
            candidates.len()
        );

        let evaluators: Vec<Evaluator<G>> = self
            .evaluators
            .iter()
            .map(|persona| {
                Evaluator::new(
                    persona.clone(),
                    Arc::clone(&self.gateway),
                    self.params.call_timeout,
                )
            })
            .collect();

        // Opinion rounds
        let mut debates: Vec<OpinionRound> = Vec::with_capacity(self.params.opinion_rounds);
        let mut lines: Vec<String> = Vec::new();
        for round in 1..=self.params.opinion_rounds.max(1) {
            let stage = RoundStage::Opining { round };
            progress.on_stage_start(&decision, &stage);

            let opinions = if self.params.parallel_calls {
                let snapshot = if round == 1 { Vec::new() } else { lines.clone() };
                self.guarded(
                    &decision,
                    stage,
                    try_join_all(
                        evaluators
                            .iter()
                            .map(|e| e.opine(&briefing, &candidates, &decision, &snapshot)),
                    ),
                )
                .await?
            } else {
                let mut opinions = Vec::with_capacity(evaluators.len());
                for evaluator in &evaluators {
                    let prior: &[String] = if round == 1 { &[] } else { &lines };
                    let opinion = self
                        .guarded(
                            &decision,
                            stage,
                            evaluator.opine(&briefing, &candidates, &decision, prior),
                        )
                        .await?;
                    lines.push(opinion.transcript_line());
                    opinions.push(opinion);
                }
                opinions
            };

            if self.params.parallel_calls {
                lines.extend(opinions.iter().map(Opinion::transcript_line));
            }
            for opinion in &opinions {
                progress.on_opinion(&decision, round, opinion);
            }

            advance(&mut phase, RoundPhase::Opined(round));
            debates.push(OpinionRound::new(round, opinions));
        }

        // Voting
        let full_transcript = transcript(debates.iter().flat_map(|r| r.opinions.iter()));
        progress.on_stage_start(&decision, &RoundStage::Voting);
        let votes: Vec<Vote> = if self.params.parallel_calls {
            self.guarded(
                &decision,
                RoundStage::Voting,
                try_join_all(
                    evaluators
                        .iter()
                        .map(|e| e.vote(&briefing, &candidates, &decision, &full_transcript)),
                ),
            )
            .await?
        } else {
            let mut votes = Vec::with_capacity(evaluators.len());
            for evaluator in &evaluators {
                let vote = self
                    .guarded(
                        &decision,
                        RoundStage::Voting,
                        evaluator.vote(&briefing, &candidates, &decision, &full_transcript),
                    )
                    .await?;
                votes.push(vote);
            }
            votes
        };
        for vote in &votes {
            progress.on_vote(&decision, vote);
        }
        advance(&mut phase, RoundPhase::Voted);

        // Tally
        let tally = Tally::from_votes(&votes);
        advance(&mut phase, RoundPhase::Tallied);
        debug!(tally = %tally.summary(), "Votes tallied");

        let resolution = match tally.leaders().as_slice() {
            [] => {
                warn!("No votes cast for {}, defaulting to first candidate", decision);
                advance(&mut phase, RoundPhase::Resolved);
                Resolution::Plurality(0)
            }
            [winner] => {
                advance(&mut phase, RoundPhase::Resolved);
                Resolution::Plurality(*winner)
            }
            tied => {
                advance(&mut phase, RoundPhase::TieDetected);
                info!(
                    "Tie between options {:?} for {}, calling the arbitrator",
                    tied.iter().map(|i| i + 1).collect::<Vec<_>>(),
                    decision.label()
                );
                progress.on_stage_start(&decision, &RoundStage::Arbitrating);

                let arbitrator = Arbitrator::new(
                    self.arbitrator.clone(),
                    Arc::clone(&self.gateway),
                    self.params.call_timeout,
                    self.params.transcript_window,
                    self.params.arbitration,
                );
                let choice = self
                    .guarded(
                        &decision,
                        RoundStage::Arbitrating,
                        arbitrator.break_tie(&briefing, &candidates, &decision, tied, &full_transcript),
                    )
                    .await?;
                let winner = choice.ok_or_else(|| DecisionError::TieArbitrationExhausted {
                    decision: decision.clone(),
                    tied: tied.to_vec(),
                })?;
                advance(&mut phase, RoundPhase::Arbitrated);
                Resolution::Arbitrated {
                    tied: tied.to_vec(),
                    winner,
                }
            }
        };

        let record = DecisionRecord::seal(decision, candidates, debates, votes, resolution);
        advance(&mut phase, RoundPhase::Finalized);

        for line in record.summary_lines() {
            info!("{}", line);
        }
        self.log_finalized(&record);
        progress.on_decision_complete(&record);

        Ok(record)
    }

    /// Await a capability call, honouring cancellation and tagging failures
    /// with the decision and stage.
    async fn guarded<T>(
        &self,
        decision: &DecisionType,
        stage: RoundStage,
        call: impl Future<Output = Result<T, CapabilityError>>,
    ) -> Result<T, DecisionError> {
        let result = match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(DecisionError::Cancelled),
                    result = call => result,
                }
            }
            None => call.await,
        };
        result.map_err(|source| {
            warn!("{} failed during {}: {}", decision, stage, source);
            DecisionError::Capability {
                decision: decision.clone(),
                stage,
                source,
            }
        })
    }

    fn log_finalized(&self, record: &DecisionRecord) {
        self.logger.log(DecisionEvent::new(
            "decision_finalized",
            serde_json::json!({
                "decision": record.decision().to_string(),
                "candidates": record.candidates(),
                "votes": record.votes(),
                "winner": record.winner(),
                "winner_votes": record.winner_votes(),
                "tie": record.is_tie(),
                "tied_candidates": record.tied_candidates(),
            }),
        ));
    }
}

fn advance(phase: &mut RoundPhase, next: RoundPhase) {
    debug_assert!(
        phase.can_advance_to(&next),
        "illegal round transition {} -> {}",
        phase,
        next
    );
    debug!(from = %phase, to = %next, "Round phase");
    *phase = next;
}

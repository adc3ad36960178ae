//! Progress notification port
//!
//! Defines the interface for reporting progress during a sequence run.

use council_domain::{CandidateSet, DecisionRecord, DecisionType, Opinion, RoundStage, Vote};

/// Callback for progress updates during a sequence run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first decision is drawn
    fn on_sequence_start(&self, recipe: &str, total_decisions: usize);

    /// Called after candidates are drawn for a decision (`position` is 1-based)
    fn on_decision_start(
        &self,
        decision: &DecisionType,
        candidates: &CandidateSet,
        position: usize,
        total: usize,
    );

    /// Called when a decision is sealed
    fn on_decision_complete(&self, record: &DecisionRecord);

    // ==================== Fine-grained Callbacks ====================

    /// Called when a round enters a stage that calls the capability
    fn on_stage_start(&self, _decision: &DecisionType, _stage: &RoundStage) {}

    /// Called for each opinion, in trace order
    fn on_opinion(&self, _decision: &DecisionType, _round: usize, _opinion: &Opinion) {}

    /// Called for each vote, in trace order
    fn on_vote(&self, _decision: &DecisionType, _vote: &Vote) {}

    /// Called after the composite is assembled
    fn on_sequence_complete(&self, _recipe: &str, _composite: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_sequence_start(&self, _recipe: &str, _total_decisions: usize) {}
    fn on_decision_start(
        &self,
        _decision: &DecisionType,
        _candidates: &CandidateSet,
        _position: usize,
        _total: usize,
    ) {
    }
    fn on_decision_complete(&self, _record: &DecisionRecord) {}
}

//! Debate parameters: decision round control.
//!
//! [`DebateParams`] groups the static parameters that control every round
//! of a sequence run. These are application-layer concerns, not domain
//! policy.

use council_domain::{ArbitrationPolicy, DEFAULT_TRANSCRIPT_WINDOW};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decision round control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Opinion rounds before voting (initial stance + rebuttals), at least 1.
    pub opinion_rounds: usize,
    /// Candidates drawn per decision unless the recipe overrides it.
    pub candidates_per_draw: usize,
    /// Bound on every capability call; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Trailing transcript characters given to the arbitrator.
    pub transcript_window: usize,
    /// Dispatch the evaluators of one stage concurrently.
    pub parallel_calls: bool,
    /// Handling of unparseable tie-break replies.
    pub arbitration: ArbitrationPolicy,
    /// Fixed seed for candidate draws; `None` mixes fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            opinion_rounds: 2,
            candidates_per_draw: 4,
            call_timeout: Some(Duration::from_secs(60)),
            transcript_window: DEFAULT_TRANSCRIPT_WINDOW,
            parallel_calls: false,
            arbitration: ArbitrationPolicy::Lenient,
            seed: None,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_opinion_rounds(mut self, rounds: usize) -> Self {
        self.opinion_rounds = rounds.max(1);
        self
    }

    pub fn with_candidates_per_draw(mut self, count: usize) -> Self {
        self.candidates_per_draw = count;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_transcript_window(mut self, window: usize) -> Self {
        self.transcript_window = window;
        self
    }

    pub fn with_parallel_calls(mut self, parallel: bool) -> Self {
        self.parallel_calls = parallel;
        self
    }

    pub fn with_arbitration(mut self, policy: ArbitrationPolicy) -> Self {
        self.arbitration = policy;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

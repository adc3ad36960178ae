//! Debate configuration from TOML (`[debate]` section)

use council_application::DebateParams;
use council_domain::{ArbitrationPolicy, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Opinion rounds before voting
    pub opinion_rounds: usize,
    /// Candidates drawn per decision (built-in recipes)
    pub candidates_per_draw: usize,
    /// Per-call timeout in seconds
    pub call_timeout_secs: u64,
    /// Trailing transcript bytes shown to the arbitrator
    pub transcript_window: usize,
    /// Fan evaluator calls out concurrently within a stage
    pub parallel_calls: bool,
    /// "lenient" or "strict"
    pub arbitration: String,
    /// Fixed seed for reproducible draws
    pub seed: Option<u64>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let params = DebateParams::default();
        Self {
            opinion_rounds: params.opinion_rounds,
            candidates_per_draw: params.candidates_per_draw,
            call_timeout_secs: params.call_timeout.map(|t| t.as_secs()).unwrap_or(60),
            transcript_window: params.transcript_window,
            parallel_calls: params.parallel_calls,
            arbitration: params.arbitration.to_string(),
            seed: params.seed,
        }
    }
}

impl FileDebateConfig {
    /// Parse the arbitration policy, falling back to lenient with an issue.
    pub fn parse_arbitration(&self) -> (ArbitrationPolicy, Option<ConfigIssue>) {
        match self.arbitration.parse::<ArbitrationPolicy>() {
            Ok(policy) => (policy, None),
            Err(_) => (
                ArbitrationPolicy::default(),
                Some(ConfigIssue::warning(
                    ConfigIssueCode::UnknownArbitrationPolicy,
                    format!(
                        "debate.arbitration: unknown value '{}', falling back to 'lenient'",
                        self.arbitration
                    ),
                )),
            ),
        }
    }

    /// Convert to run parameters.
    pub fn to_params(&self) -> DebateParams {
        let timeout = (self.call_timeout_secs > 0).then(|| Duration::from_secs(self.call_timeout_secs));
        DebateParams::default()
            .with_opinion_rounds(self.opinion_rounds)
            .with_candidates_per_draw(self.candidates_per_draw)
            .with_call_timeout(timeout)
            .with_transcript_window(self.transcript_window)
            .with_parallel_calls(self.parallel_calls)
            .with_arbitration(self.parse_arbitration().0)
            .with_seed(self.seed)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.opinion_rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroOpinionRounds,
                "debate.opinion_rounds is 0; one round will be run",
            ));
        }
        if self.candidates_per_draw == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroCandidates,
                "debate.candidates_per_draw cannot be 0",
            ));
        }
        if self.call_timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "debate.call_timeout_secs is 0; calls will not be time-bounded",
            ));
        }
        if self.transcript_window == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyTranscriptWindow,
                "debate.transcript_window is 0; the arbitrator will not see the debate",
            ));
        }
        issues.extend(self.parse_arbitration().1);

        issues
    }
}

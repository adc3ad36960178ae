//! Evaluators and the arbitrator
//!
//! Thin wrappers that pair a [`Persona`] with the gateway: they build the
//! prompt for each step, bound the call with the configured timeout, and
//! parse the free-text reply leniently.

use crate::ports::llm_gateway::{CapabilityError, LlmGateway};
use council_domain::{
    ArbitrationPolicy, CandidateSet, DebatePromptTemplate, DecisionType, Opinion, Persona, Vote,
    parse_preferred_index, parse_vote_index,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Invoke the gateway, bounded by `timeout` when set.
pub(crate) async fn invoke_bounded<G: LlmGateway + ?Sized>(
    gateway: &G,
    persona: &Persona,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, CapabilityError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, gateway.invoke(persona, prompt))
            .await
            .map_err(|_| CapabilityError::Timeout(limit))?,
        None => gateway.invoke(persona, prompt).await,
    }
}

/// One biased member of the council
pub struct Evaluator<G: LlmGateway + 'static> {
    persona: Persona,
    gateway: Arc<G>,
    timeout: Option<Duration>,
}

impl<G: LlmGateway + 'static> Evaluator<G> {
    pub fn new(persona: Persona, gateway: Arc<G>, timeout: Option<Duration>) -> Self {
        Self {
            persona,
            gateway,
            timeout,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn name(&self) -> &str {
        &self.persona.name
    }

    /// Voice an opinion on `candidates`.
    ///
    /// `prior` holds the transcript lines this evaluator may see; it is
    /// empty in the first opinion round. An empty reply is an error: the
    /// round cannot continue with a missing opinion.
    pub async fn opine(
        &self,
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        prior: &[String],
    ) -> Result<Opinion, CapabilityError> {
        let prompt =
            DebatePromptTemplate::opinion_prompt(self.name(), briefing, candidates, decision, prior);
        let response = invoke_bounded(&*self.gateway, &self.persona, &prompt, self.timeout).await?;

        let text = strip_own_prefix(response.trim(), self.name());
        if text.is_empty() {
            return Err(CapabilityError::EmptyResponse);
        }

        let preferred = parse_preferred_index(text, candidates.len());
        debug!(evaluator = %self.name(), ?preferred, "Opinion received");
        Ok(Opinion::new(self.name(), text).with_preferred(preferred))
    }

    /// Cast the final vote after every opinion round.
    ///
    /// Never fails on content: a reply without a usable digit votes for the
    /// first candidate.
    pub async fn vote(
        &self,
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        transcript: &str,
    ) -> Result<Vote, CapabilityError> {
        let prompt = DebatePromptTemplate::vote_prompt(briefing, candidates, decision, transcript);
        let response = invoke_bounded(&*self.gateway, &self.persona, &prompt, self.timeout).await?;

        let index = parse_vote_index(&response, candidates.len());
        debug!(evaluator = %self.name(), index, "Vote received");
        Vote::new(self.name(), index, candidates).ok_or_else(|| {
            CapabilityError::MalformedResponse(format!(
                "vote index {} outside {} candidates",
                index,
                candidates.len()
            ))
        })
    }
}

/// Neutral supervisor that settles ties
pub struct Arbitrator<G: LlmGateway + 'static> {
    persona: Persona,
    gateway: Arc<G>,
    timeout: Option<Duration>,
    transcript_window: usize,
    policy: ArbitrationPolicy,
}

impl<G: LlmGateway + 'static> Arbitrator<G> {
    pub fn new(
        persona: Persona,
        gateway: Arc<G>,
        timeout: Option<Duration>,
        transcript_window: usize,
        policy: ArbitrationPolicy,
    ) -> Self {
        Self {
            persona,
            gateway,
            timeout,
            transcript_window,
            policy,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Pick one of `tied`.
    ///
    /// Sees only the tied candidates and the trailing transcript window.
    /// Returns `Ok(None)` only when the policy is strict and the reply names
    /// none of the tied candidates.
    pub async fn break_tie(
        &self,
        briefing: &str,
        candidates: &CandidateSet,
        decision: &DecisionType,
        tied: &[usize],
        transcript: &str,
    ) -> Result<Option<usize>, CapabilityError> {
        let prompt = DebatePromptTemplate::tiebreak_prompt(
            briefing,
            candidates,
            decision,
            tied,
            transcript,
            self.transcript_window,
        );
        let response = invoke_bounded(&*self.gateway, &self.persona, &prompt, self.timeout).await?;

        let choice = self.policy.settle(&response, tied);
        debug!(arbitrator = %self.persona.name, ?tied, ?choice, reply = %response.trim(), "Tie-break reply");
        Ok(choice)
    }
}

/// Drop a leading `**NAME**:` the model may echo back.
fn strip_own_prefix<'a>(text: &'a str, name: &str) -> &'a str {
    let prefix = format!("**{name}**:");
    text.strip_prefix(prefix.as_str())
        .map(str::trim_start)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, CapabilityError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<String, CapabilityError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn invoke(&self, _persona: &Persona, prompt: &str) -> Result<String, CapabilityError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CapabilityError::Other("No more replies".to_string())))
        }
    }

    struct StalledGateway;

    #[async_trait]
    impl LlmGateway for StalledGateway {
        async fn invoke(&self, _persona: &Persona, _prompt: &str) -> Result<String, CapabilityError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("1".to_string())
        }
    }

    fn candidates() -> CandidateSet {
        CandidateSet::new(vec![
            "A DETECTIVE".into(),
            "A THIEF".into(),
            "A GHOST".into(),
            "A KING".into(),
        ])
        .unwrap()
    }

    fn evaluator(gateway: Arc<ScriptedGateway>) -> Evaluator<ScriptedGateway> {
        Evaluator::new(Persona::critic(), gateway, None)
    }

    // ==================== Evaluator Tests ====================

    #[tokio::test]
    async fn test_opine_records_preferred_candidate() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "  Card 3 is the freshest choice.  ".to_string(),
        )]));
        let opinion = evaluator(gateway.clone())
            .opine("", &candidates(), &DecisionType::new("agents"), &[])
            .await
            .unwrap();

        assert_eq!(opinion.evaluator, "CRITIC");
        assert_eq!(opinion.text, "Card 3 is the freshest choice.");
        assert_eq!(opinion.preferred, Some(2));
        assert!(gateway.prompts.lock().unwrap()[0].contains("as CRITIC"));
    }

    #[tokio::test]
    async fn test_opine_strips_echoed_name() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "**CRITIC**: Option 1 is cliche.".to_string(),
        )]));
        let opinion = evaluator(gateway)
            .opine("", &candidates(), &DecisionType::new("agents"), &[])
            .await
            .unwrap();
        assert_eq!(opinion.transcript_line(), "**CRITIC**: Option 1 is cliche.");
    }

    #[tokio::test]
    async fn test_empty_opinion_is_error() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("   ".to_string())]));
        let err = evaluator(gateway)
            .opine("", &candidates(), &DecisionType::new("agents"), &[])
            .await
            .unwrap_err();
        assert_eq!(err, CapabilityError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_vote_parses_first_in_range_digit() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
            "I think the answer is option 3 because...".to_string(),
        )]));
        let vote = evaluator(gateway)
            .vote("", &candidates(), &DecisionType::new("agents"), "transcript")
            .await
            .unwrap();
        assert_eq!(vote.voted_for, 2);
        assert_eq!(vote.voted_card.label(), "A GHOST");
    }

    #[tokio::test]
    async fn test_vote_without_digit_defaults_to_first() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("Hard to say.".to_string())]));
        let vote = evaluator(gateway)
            .vote("", &candidates(), &DecisionType::new("agents"), "")
            .await
            .unwrap();
        assert_eq!(vote.voted_for, 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(CapabilityError::Connection(
            "refused".to_string(),
        ))]));
        let err = evaluator(gateway)
            .vote("", &candidates(), &DecisionType::new("agents"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Connection(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_timeout() {
        let evaluator = Evaluator::new(
            Persona::placer(),
            Arc::new(StalledGateway),
            Some(Duration::from_secs(30)),
        );
        let err = evaluator
            .vote("", &candidates(), &DecisionType::new("agents"), "")
            .await
            .unwrap_err();
        assert_eq!(err, CapabilityError::Timeout(Duration::from_secs(30)));
    }

    // ==================== Arbitrator Tests ====================

    fn arbitrator(reply: &str, policy: ArbitrationPolicy) -> Arbitrator<ScriptedGateway> {
        Arbitrator::new(
            Persona::supervisor(),
            Arc::new(ScriptedGateway::new(vec![Ok(reply.to_string())])),
            None,
            2000,
            policy,
        )
    }

    #[tokio::test]
    async fn test_break_tie_picks_tied_digit() {
        let choice = arbitrator("I choose option 2", ArbitrationPolicy::Lenient)
            .break_tie("", &candidates(), &DecisionType::new("agents"), &[0, 1], "")
            .await
            .unwrap();
        assert_eq!(choice, Some(1));
    }

    #[tokio::test]
    async fn test_break_tie_fallback() {
        let choice = arbitrator("Both are strong", ArbitrationPolicy::Lenient)
            .break_tie("", &candidates(), &DecisionType::new("agents"), &[0, 1], "")
            .await
            .unwrap();
        assert_eq!(choice, Some(0));
    }

    #[tokio::test]
    async fn test_break_tie_strict_without_choice() {
        let choice = arbitrator("Both are strong", ArbitrationPolicy::Strict)
            .break_tie("", &candidates(), &DecisionType::new("agents"), &[0, 1], "")
            .await
            .unwrap();
        assert_eq!(choice, None);
    }

    #[tokio::test]
    async fn test_break_tie_prompt_is_windowed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok("1".to_string())]));
        let arbitrator = Arbitrator::new(
            Persona::supervisor(),
            gateway.clone(),
            None,
            50,
            ArbitrationPolicy::Lenient,
        );
        let transcript = format!("{}TAIL", "early words ".repeat(100));
        arbitrator
            .break_tie("", &candidates(), &DecisionType::new("agents"), &[0, 3], &transcript)
            .await
            .unwrap();

        let prompt = gateway.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("TAIL"));
        assert!(prompt.contains("  4. A KING"));
        assert!(!prompt.contains("A THIEF"));
        assert!(prompt.matches("early words").count() < 10);
    }
}

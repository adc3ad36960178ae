//! Sealed outcome of a decision round
//!
//! A [`DecisionRecord`] is created once a round reaches `FINALIZED` and is
//! never modified afterwards; fields are only reachable through accessors.

use super::candidate::{Candidate, CandidateSet};
use super::decision_type::DecisionType;
use super::opinion::OpinionRound;
use super::vote::{Tally, Vote};
use serde::{Deserialize, Serialize};

/// How the winner of a round was determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The tally had a unique maximum
    Plurality(usize),
    /// The tally was tied and the arbitrator chose among `tied`
    Arbitrated { tied: Vec<usize>, winner: usize },
}

impl Resolution {
    pub fn winner(&self) -> usize {
        match self {
            Resolution::Plurality(winner) => *winner,
            Resolution::Arbitrated { winner, .. } => *winner,
        }
    }
}

/// Voting section of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingOutcome {
    votes: Vec<Vote>,
    vote_counts: Tally,
    winner_index: usize,
    winner_card: Candidate,
    winner_votes: usize,
    tie: bool,
    #[serde(default)]
    tied_indices: Option<Vec<usize>>,
    #[serde(default)]
    tied_candidates: Option<Vec<Candidate>>,
}

/// Complete trace of one decision round
///
/// # Example
///
/// ```
/// use council_domain::{CandidateSet, DecisionRecord, DecisionType, Resolution, Vote};
///
/// let candidates = CandidateSet::new(vec!["A DETECTIVE".into(), "A THIEF".into()]).unwrap();
/// let votes: Vec<Vote> = [0, 0, 1, 0]
///     .iter()
///     .map(|&i| Vote::new("PLACER", i, &candidates).unwrap())
///     .collect();
/// let record = DecisionRecord::seal(
///     DecisionType::new("agents"),
///     candidates,
///     vec![],
///     votes,
///     Resolution::Plurality(0),
/// );
/// assert_eq!(record.winner().label(), "A DETECTIVE");
/// assert_eq!(record.winner_votes(), 3);
/// assert!(!record.is_tie());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(rename = "card_type")]
    decision: DecisionType,
    candidates: CandidateSet,
    debates: Vec<OpinionRound>,
    voting: VotingOutcome,
}

impl DecisionRecord {
    /// Seal a finished round.
    ///
    /// The tally is computed here from the complete vote list.
    ///
    /// # Panics
    ///
    /// Panics if the winner is not a valid candidate index. The round use
    /// case only passes indices produced by the parsers, which are always
    /// in range.
    pub fn seal(
        decision: DecisionType,
        candidates: CandidateSet,
        debates: Vec<OpinionRound>,
        votes: Vec<Vote>,
        resolution: Resolution,
    ) -> Self {
        let vote_counts = Tally::from_votes(&votes);
        let winner_index = resolution.winner();
        let winner_card = candidates[winner_index].clone();
        let winner_votes = vote_counts.count(winner_index);

        let (tie, tied_indices) = match resolution {
            Resolution::Plurality(_) => (false, None),
            Resolution::Arbitrated { tied, .. } => (true, Some(tied)),
        };
        let tied_candidates = tied_indices.as_ref().map(|tied| {
            tied.iter()
                .filter_map(|&i| candidates.get(i).cloned())
                .collect()
        });

        Self {
            decision,
            candidates,
            debates,
            voting: VotingOutcome {
                votes,
                vote_counts,
                winner_index,
                winner_card,
                winner_votes,
                tie,
                tied_indices,
                tied_candidates,
            },
        }
    }

    pub fn decision(&self) -> &DecisionType {
        &self.decision
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn debates(&self) -> &[OpinionRound] {
        &self.debates
    }

    pub fn votes(&self) -> &[Vote] {
        &self.voting.votes
    }

    pub fn tally(&self) -> &Tally {
        &self.voting.vote_counts
    }

    pub fn winner_index(&self) -> usize {
        self.voting.winner_index
    }

    pub fn winner(&self) -> &Candidate {
        &self.voting.winner_card
    }

    pub fn winner_votes(&self) -> usize {
        self.voting.winner_votes
    }

    pub fn is_tie(&self) -> bool {
        self.voting.tie
    }

    pub fn tied_indices(&self) -> Option<&[usize]> {
        self.voting.tied_indices.as_deref()
    }

    pub fn tied_candidates(&self) -> Option<&[Candidate]> {
        self.voting.tied_candidates.as_deref()
    }

    /// Human-readable summary: options, each vote, and the winner.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.voting.votes.len() + 2);
        lines.push(format!(
            "[{}] Options: {}",
            self.decision.label(),
            self.candidates.joined()
        ));
        for vote in &self.voting.votes {
            lines.push(format!("  {} -> {}", vote.evaluator, vote.voted_card));
        }
        let tie_note = if self.voting.tie { ", tie broken" } else { "" };
        lines.push(format!(
            "  >>> Winner: {} ({} votes{})",
            self.voting.winner_card, self.voting.winner_votes, tie_note
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::opinion::Opinion;

    fn candidates() -> CandidateSet {
        CandidateSet::new(vec![
            "A DETECTIVE".into(),
            "A THIEF".into(),
            "A GHOST".into(),
            "A KING".into(),
        ])
        .unwrap()
    }

    fn votes(indices: &[usize]) -> Vec<Vote> {
        let set = candidates();
        let names = ["PLACER", "ROTATOR", "CRITIC", "SYNTHESIZER"];
        indices
            .iter()
            .zip(names)
            .map(|(&i, name)| Vote::new(name, i, &set).unwrap())
            .collect()
    }

    #[test]
    fn test_plurality_record() {
        let record = DecisionRecord::seal(
            DecisionType::new("agents"),
            candidates(),
            vec![OpinionRound::new(1, vec![Opinion::new("PLACER", "1!")])],
            votes(&[0, 0, 1, 2]),
            Resolution::Plurality(0),
        );

        assert_eq!(record.winner_index(), 0);
        assert_eq!(record.winner_votes(), 2);
        assert!(!record.is_tie());
        assert!(record.tied_indices().is_none());
        assert!(record.tied_candidates().is_none());
        assert_eq!(record.tally().total(), 4);
    }

    #[test]
    fn test_arbitrated_record() {
        let record = DecisionRecord::seal(
            DecisionType::new("agents"),
            candidates(),
            vec![],
            votes(&[0, 1, 0, 1]),
            Resolution::Arbitrated {
                tied: vec![0, 1],
                winner: 1,
            },
        );

        assert!(record.is_tie());
        assert_eq!(record.winner().label(), "A THIEF");
        assert_eq!(record.tied_indices(), Some(&[0, 1][..]));
        let tied: Vec<_> = record
            .tied_candidates()
            .unwrap()
            .iter()
            .map(|c| c.label())
            .collect();
        assert_eq!(tied, vec!["A DETECTIVE", "A THIEF"]);
    }

    #[test]
    fn test_summary_lines() {
        let record = DecisionRecord::seal(
            DecisionType::new("agents"),
            candidates(),
            vec![],
            votes(&[0, 0, 1, 2]),
            Resolution::Plurality(0),
        );
        let lines = record.summary_lines();
        assert_eq!(
            lines[0],
            "[AGENTS] Options: A DETECTIVE, A THIEF, A GHOST, A KING"
        );
        assert_eq!(lines[1], "  PLACER -> A DETECTIVE");
        assert_eq!(lines.last().unwrap(), "  >>> Winner: A DETECTIVE (2 votes)");
    }

    #[test]
    fn test_serialized_shape() {
        let record = DecisionRecord::seal(
            DecisionType::nth("agents", 2),
            candidates(),
            vec![],
            votes(&[0, 1, 0, 1]),
            Resolution::Arbitrated {
                tied: vec![0, 1],
                winner: 0,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["card_type"], "agents_2");
        assert_eq!(value["candidates"][3], "A KING");
        assert_eq!(value["voting"]["tie"], true);
        assert_eq!(value["voting"]["vote_counts"]["1"], 2);
        assert_eq!(value["voting"]["tied_candidates"][1], "A THIEF");

        let back: DecisionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}

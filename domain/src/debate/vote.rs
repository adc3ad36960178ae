//! Vote types for debate resolution
//!
//! This module defines the voting primitives: one [`Vote`] per evaluator and
//! the plurality [`Tally`] computed once every vote of a round is in.

use super::candidate::{Candidate, CandidateSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single evaluator's final choice in a round
///
/// # Example
///
/// ```
/// use council_domain::{CandidateSet, Vote};
///
/// let candidates = CandidateSet::new(vec!["A GHOST".into(), "A KING".into()]).unwrap();
/// let vote = Vote::new("CRITIC", 1, &candidates).unwrap();
/// assert_eq!(vote.voted_card.label(), "A KING");
/// assert!(Vote::new("CRITIC", 2, &candidates).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Persona name of the evaluator
    #[serde(rename = "agent")]
    pub evaluator: String,
    /// 0-based index into the round's candidates
    pub voted_for: usize,
    /// The chosen candidate, denormalized for the trace
    pub voted_card: Candidate,
}

impl Vote {
    /// Returns `None` when `index` is not a valid candidate index.
    pub fn new(evaluator: impl Into<String>, index: usize, candidates: &CandidateSet) -> Option<Self> {
        let voted_card = candidates.get(index)?.clone();
        Some(Self {
            evaluator: evaluator.into(),
            voted_for: index,
            voted_card,
        })
    }
}

/// Plurality count of a complete set of votes
///
/// Built only from the full vote list of a round; there is no way to add
/// votes to an existing tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<usize, usize>);

impl Tally {
    pub fn from_votes(votes: &[Vote]) -> Self {
        let mut counts = BTreeMap::new();
        for vote in votes {
            *counts.entry(vote.voted_for).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Votes received by a candidate index (0 when it received none).
    pub fn count(&self, index: usize) -> usize {
        self.0.get(&index).copied().unwrap_or(0)
    }

    /// Sum of all counts; equals the number of votes cast.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn max_count(&self) -> usize {
        self.0.values().copied().max().unwrap_or(0)
    }

    /// Indices sharing the maximum count, in ascending (original candidate) order.
    pub fn leaders(&self) -> Vec<usize> {
        let max = self.max_count();
        if max == 0 {
            return Vec::new();
        }
        self.0
            .iter()
            .filter(|&(_, &count)| count == max)
            .map(|(&index, _)| index)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&i, &c)| (i, c))
    }

    /// Generate a visual tally (e.g., "1:●● 2:● 3:●")
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(index, count)| format!("{}:{}", index + 1, "●".repeat(*count)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
        indices
            .iter()
            .enumerate()
            .map(|(i, &idx)| Vote::new(format!("agent-{i}"), idx, &set).unwrap())
            .collect()
    }

    #[test]
    fn test_unique_leader() {
        let tally = Tally::from_votes(&votes(&[0, 0, 1, 2]));
        assert_eq!(tally.count(0), 2);
        assert_eq!(tally.count(1), 1);
        assert_eq!(tally.count(2), 1);
        assert_eq!(tally.count(3), 0);
        assert_eq!(tally.leaders(), vec![0]);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_two_way_tie_leaders_sorted() {
        let tally = Tally::from_votes(&votes(&[1, 0, 1, 0]));
        assert_eq!(tally.leaders(), vec![0, 1]);
        assert_eq!(tally.max_count(), 2);
    }

    #[test]
    fn test_four_way_tie() {
        let tally = Tally::from_votes(&votes(&[3, 2, 1, 0]));
        assert_eq!(tally.leaders(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::from_votes(&[]);
        assert!(tally.leaders().is_empty());
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_summary() {
        let tally = Tally::from_votes(&votes(&[0, 0, 2, 0]));
        assert_eq!(tally.summary(), "1:●●● 3:●");
    }

    #[test]
    fn test_tally_serializes_as_map() {
        let tally = Tally::from_votes(&votes(&[0, 0, 1, 2]));
        let value = serde_json::to_value(&tally).unwrap();
        assert_eq!(value["0"], 2);
        assert_eq!(value["1"], 1);
    }
}

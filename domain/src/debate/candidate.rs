//! Candidate value object and the drawn candidate set for one round.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One option offered in a decision (an opaque card label).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn into_label(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The fixed, ordered candidates of one round.
///
/// Construction fails on an empty list or duplicate labels, so a round can
/// rely on `1 <= len()` and on every label being distinct. Once built the
/// set is never mutated (the `DRAWN` state of a round).
///
/// # Example
///
/// ```
/// use council_domain::CandidateSet;
///
/// let set = CandidateSet::new(vec!["A GHOST".into(), "A KING".into()]).unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.numbered(), "  1. A GHOST\n  2. A KING");
/// assert!(CandidateSet::new(vec![]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateSet(Vec<Candidate>);

impl CandidateSet {
    /// Returns `None` for an empty list or when a label repeats.
    pub fn new(candidates: Vec<Candidate>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        for (i, candidate) in candidates.iter().enumerate() {
            if candidates[..i].contains(candidate) {
                return None;
            }
        }
        Some(Self(candidates))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.0.len()
    }

    /// Comma-separated labels (used in round summaries).
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(Candidate::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 1-based numbered listing, one option per line.
    pub fn numbered(&self) -> String {
        self.numbered_subset(0..self.0.len())
    }

    /// Numbered listing of selected indices, keeping their original numbers.
    pub fn numbered_subset(&self, indices: impl IntoIterator<Item = usize>) -> String {
        indices
            .into_iter()
            .filter_map(|i| self.0.get(i).map(|c| format!("  {}. {}", i + 1, c)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::ops::Index<usize> for CandidateSet {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> CandidateSet {
        CandidateSet::new(labels.iter().map(|l| Candidate::from(*l)).collect()).unwrap()
    }

    #[test]
    fn test_rejects_duplicates() {
        let candidates = vec![Candidate::from("A THIEF"), Candidate::from("A THIEF")];
        assert!(CandidateSet::new(candidates).is_none());
    }

    #[test]
    fn test_numbered_subset_keeps_original_positions() {
        let set = set(&["A", "B", "C", "D"]);
        assert_eq!(set.numbered_subset([1, 3]), "  2. B\n  4. D");
    }

    #[test]
    fn test_joined() {
        let set = set(&["A DETECTIVE", "A THIEF"]);
        assert_eq!(set.joined(), "A DETECTIVE, A THIEF");
        assert!(set.contains_index(1));
        assert!(!set.contains_index(2));
    }
}

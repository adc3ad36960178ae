//! Accumulated context of a decision sequence
//!
//! Ordered `DecisionType -> winning label` entries, built one resolved round
//! at a time. Entries can be appended but never replaced or removed.

use super::decision_type::DecisionType;
use crate::core::error::ContextError;
use serde::{Deserialize, Serialize};

/// Append-only record of the winners resolved so far
///
/// # Example
///
/// ```
/// use council_domain::{AccumulatedContext, DecisionType};
///
/// let mut context = AccumulatedContext::new();
/// context.resolve(DecisionType::new("agents"), "A DETECTIVE").unwrap();
/// assert_eq!(context.get_str("agents"), Some("A DETECTIVE"));
/// assert!(context.resolve(DecisionType::new("agents"), "A THIEF").is_err());
/// assert_eq!(context.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccumulatedContext {
    entries: Vec<(DecisionType, String)>,
}

impl AccumulatedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolved decision.
    ///
    /// Fails if `decision` was already resolved; the existing value is kept.
    pub fn resolve(
        &mut self,
        decision: DecisionType,
        winner: impl Into<String>,
    ) -> Result<(), ContextError> {
        if self.contains(&decision) {
            return Err(ContextError::AlreadyResolved(decision.to_string()));
        }
        self.entries.push((decision, winner.into()));
        Ok(())
    }

    pub fn get(&self, decision: &DecisionType) -> Option<&str> {
        self.entries
            .iter()
            .find(|(ty, _)| ty == decision)
            .map(|(_, value)| value.as_str())
    }

    /// Lookup by the textual decision key (e.g. `"agents_2"`).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let decision: DecisionType = key.parse().ok()?;
        self.get(&decision)
    }

    pub fn contains(&self, decision: &DecisionType) -> bool {
        self.entries.iter().any(|(ty, _)| ty == decision)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&DecisionType, &str)> {
        self.entries.iter().map(|(ty, value)| (ty, value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_resolution_order() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("engines"), "WANTS TO SOLVE").unwrap();
        context.resolve(DecisionType::new("agents"), "A DETECTIVE").unwrap();

        let keys: Vec<String> = context.iter().map(|(ty, _)| ty.to_string()).collect();
        assert_eq!(keys, vec!["engines", "agents"]);
    }

    #[test]
    fn test_suffixed_types_are_distinct_entries() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("agents"), "A GHOST").unwrap();
        context.resolve(DecisionType::nth("agents", 2), "A KING").unwrap();

        assert_eq!(context.get_str("agents"), Some("A GHOST"));
        assert_eq!(context.get_str("agents_2"), Some("A KING"));
    }

    #[test]
    fn test_rejects_re_resolution_and_keeps_value() {
        let mut context = AccumulatedContext::new();
        context.resolve(DecisionType::new("anchors"), "A KEY").unwrap();

        let err = context
            .resolve(DecisionType::new("anchors"), "A MAP")
            .unwrap_err();
        assert_eq!(err, ContextError::AlreadyResolved("anchors".to_string()));
        assert_eq!(context.get_str("anchors"), Some("A KEY"));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_missing_lookup() {
        let context = AccumulatedContext::new();
        assert!(context.is_empty());
        assert_eq!(context.get_str("aspects"), None);
    }
}

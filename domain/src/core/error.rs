//! Domain error types

use thiserror::Error;

/// A decision sequence that cannot be run.
///
/// Raised eagerly, before the first round is drawn, so that a misconfigured
/// recipe never burns capability calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequenceError {
    #[error("Sequence '{sequence}' has no decisions to resolve")]
    Empty { sequence: String },

    #[error("Decision '{decision}' draws from pool '{pool}', which does not exist in the deck")]
    UnknownPool { decision: String, pool: String },

    #[error("Decision '{decision}' draws from pool '{pool}', which is empty")]
    EmptyPool { decision: String, pool: String },

    #[error("Decision '{decision}' requests zero candidates")]
    ZeroCandidates { decision: String },

    #[error("Decision '{decision}' appears more than once in the sequence")]
    DuplicateDecision { decision: String },
}

/// Violation of the append-only accumulated context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Decision '{0}' has already been resolved in this run")]
    AlreadyResolved(String),
}

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    InvalidSequence(#[from] InvalidSequenceError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Invalid decision type: {0}")]
    InvalidDecisionType(String),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::UnknownRecipe("x".to_string()).is_cancelled());
    }

    #[test]
    fn test_invalid_sequence_display_names_decision() {
        let error = InvalidSequenceError::UnknownPool {
            decision: "agents_2".to_string(),
            pool: "agents".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("agents_2"));
        assert!(message.contains("'agents'"));
    }

    #[test]
    fn test_invalid_sequence_converts_into_domain_error() {
        let error: DomainError = InvalidSequenceError::ZeroCandidates {
            decision: "engines".to_string(),
        }
        .into();
        assert!(matches!(error, DomainError::InvalidSequence(_)));
        assert_eq!(error.to_string(), "Decision 'engines' requests zero candidates");
    }
}

//! Decision type value object
//!
//! A decision type names the pool a round draws from (`agents`, `regions`, ...)
//! plus an ordinal for repeated, independent draws of the same pool within
//! one sequence (`agents_2` is the second character of a Circle of Fate).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one decision in a sequence (Value Object)
///
/// # Example
///
/// ```
/// use council_domain::DecisionType;
///
/// let second: DecisionType = "agents_2".parse().unwrap();
/// assert_eq!(second.base(), "agents");
/// assert_eq!(second.ordinal(), 2);
/// assert_eq!(second.to_string(), "agents_2");
///
/// let first = DecisionType::new("agents");
/// assert_eq!(first.ordinal(), 1);
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DecisionType {
    base: String,
    ordinal: u32,
}

impl DecisionType {
    /// First occurrence of a pool in a sequence.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ordinal: 1,
        }
    }

    /// The `ordinal`-th occurrence of a pool (1-based).
    pub fn nth(base: impl Into<String>, ordinal: u32) -> Self {
        Self {
            base: base.into(),
            ordinal: ordinal.max(1),
        }
    }

    /// Pool name with the ordinal suffix stripped.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Upper-cased label used in prompts and summaries (e.g. `AGENTS_2`).
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ordinal <= 1 {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}_{}", self.base, self.ordinal)
        }
    }
}

impl FromStr for DecisionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidDecisionType(
                "decision type cannot be empty".to_string(),
            ));
        }

        if let Some((base, suffix)) = s.rsplit_once('_')
            && let Ok(ordinal) = suffix.parse::<u32>()
        {
            if base.is_empty() || ordinal == 0 {
                return Err(DomainError::InvalidDecisionType(s.to_string()));
            }
            return Ok(Self::nth(base, ordinal));
        }

        Ok(Self::new(s))
    }
}

impl TryFrom<String> for DecisionType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DecisionType> for String {
    fn from(value: DecisionType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let ty: DecisionType = "engines".parse().unwrap();
        assert_eq!(ty.base(), "engines");
        assert_eq!(ty.ordinal(), 1);
        assert_eq!(ty.to_string(), "engines");
    }

    #[test]
    fn test_parse_suffixed() {
        let ty: DecisionType = "landmarks_2".parse().unwrap();
        assert_eq!(ty.base(), "landmarks");
        assert_eq!(ty.ordinal(), 2);
        assert_eq!(ty.label(), "LANDMARKS_2");
    }

    #[test]
    fn test_non_numeric_suffix_is_part_of_base() {
        let ty: DecisionType = "story_engine".parse().unwrap();
        assert_eq!(ty.base(), "story_engine");
        assert_eq!(ty.ordinal(), 1);
    }

    #[test]
    fn test_explicit_first_ordinal_normalizes() {
        let ty: DecisionType = "agents_1".parse().unwrap();
        assert_eq!(ty, DecisionType::new("agents"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!("".parse::<DecisionType>().is_err());
        assert!("_2".parse::<DecisionType>().is_err());
        assert!("agents_0".parse::<DecisionType>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let ty = DecisionType::nth("aspects", 2);
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "\"aspects_2\"");
        let back: DecisionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);
    }
}

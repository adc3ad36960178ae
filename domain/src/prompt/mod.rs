//! Prompt domain
//!
//! Templates for the opinion, vote and tie-break prompts of a decision round.

mod template;

pub use template::{DEFAULT_TRANSCRIPT_WINDOW, DebatePromptTemplate};

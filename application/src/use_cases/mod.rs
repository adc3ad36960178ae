//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_decision;
pub mod run_sequence;
pub(crate) mod shared;

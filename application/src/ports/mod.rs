//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod deck_source;
pub mod decision_logger;
pub mod llm_gateway;
pub mod progress;

//! Port for structured decision logging.
//!
//! Defines the [`DecisionLogger`] trait, the observability sink every
//! finalized round reports to. It is separate from `tracing`-based
//! operation logs: tracing handles human-readable diagnostic messages,
//! while this port captures the debate trace in a machine-readable format
//! (JSONL).

use serde_json::Value;

/// A structured decision event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
pub struct DecisionEvent {
    /// Event type identifier (e.g., "decision_finalized", "sequence_started").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DecisionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging decision events to a structured log.
///
/// The `log` method is synchronous and non-fallible; a logging failure
/// never aborts a run.
pub trait DecisionLogger: Send + Sync {
    /// Record a decision event.
    fn log(&self, event: DecisionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDecisionLogger;

impl DecisionLogger for NoDecisionLogger {
    fn log(&self, _event: DecisionEvent) {}
}

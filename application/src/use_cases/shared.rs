//! Shared utilities for use cases.
//!
//! Contains the cancellation check used by both the round and the
//! sequence use cases.

use crate::use_cases::run_decision::DecisionError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(DecisionError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), DecisionError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(DecisionError::Cancelled);
    }
    Ok(())
}

//! LLM Gateway port
//!
//! Defines the interface for the generative text capability behind every
//! evaluator and the arbitrator.

use async_trait::async_trait;
use council_domain::Persona;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a capability call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for generative text calls
///
/// Each call is stateless: the persona's system prompt and the user prompt
/// are everything the capability sees. Implementations (adapters) live in
/// the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `prompt` under `persona` and return the raw reply text.
    async fn invoke(&self, persona: &Persona, prompt: &str) -> Result<String, CapabilityError>;
}

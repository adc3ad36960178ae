//! OpenRouter adapter
//!
//! Implements LlmGateway over the OpenAI-compatible chat completions API.
//! Any endpoint speaking the same protocol works by overriding `base_url`.

pub mod gateway;
pub mod protocol;

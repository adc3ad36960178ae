//! OpenRouter LLM Gateway implementation

use super::protocol::{ChatMessage, ChatRequest, extract_content};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{CapabilityError, LlmGateway};
use council_domain::Persona;
use std::time::Duration;
use tracing::{debug, info};

/// Default endpoint (OpenAI-compatible)
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default model for every persona
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Legacy variable name accepted when the primary one is unset
pub const FALLBACK_API_KEY_ENV: &str = "OPR_ROUTER_API_KEY";

/// Connection settings for [`OpenRouterGateway`]
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: Option<u32>,
    /// Transport-level timeout; the round use case applies its own per-call bound
    pub request_timeout: Option<Duration>,
    /// Sent as `X-Title` for OpenRouter attribution
    pub app_title: Option<String>,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            max_tokens: None,
            request_timeout: None,
            app_title: Some("story-council".to_string()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Resolve the API key: explicit value first, then `env_name`, then the
/// legacy fallback variable.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, CapabilityError> {
    explicit
        .map(str::to_string)
        .or_else(|| lookup(env_name))
        .or_else(|| lookup(FALLBACK_API_KEY_ENV))
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| CapabilityError::MissingApiKey(env_name.to_string()))
}

/// LLM Gateway implementation for OpenRouter (and compatible endpoints)
pub struct OpenRouterGateway {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterGateway {
    pub fn new(config: OpenRouterConfig) -> Result<Self, CapabilityError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CapabilityError::Other(format!("HTTP client: {e}")))?;

        info!(model = %config.model, base_url = %config.base_url, "OpenRouterGateway initialized");
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn map_transport_error(&self, error: reqwest::Error) -> CapabilityError {
        if error.is_timeout() {
            CapabilityError::Timeout(self.config.request_timeout.unwrap_or_default())
        } else if error.is_connect() {
            CapabilityError::Connection(error.to_string())
        } else {
            CapabilityError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn invoke(&self, persona: &Persona, prompt: &str) -> Result<String, CapabilityError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage::system(&persona.system_prompt),
                ChatMessage::user(prompt),
            ],
            temperature: persona.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(persona = %persona.name, bytes = prompt.len(), "Sending chat completion");

        let mut http = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request);
        if let Some(title) = &self.config.app_title {
            http = http.header("X-Title", title);
        }

        let response = http
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(CapabilityError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let content = extract_content(&body)?;
        debug!(persona = %persona.name, bytes = content.len(), "Chat completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key(
            Some("sk-explicit"),
            DEFAULT_API_KEY_ENV,
            env(&[(DEFAULT_API_KEY_ENV, "sk-env")]),
        )
        .unwrap();
        assert_eq!(key, "sk-explicit");
    }

    #[test]
    fn test_primary_then_fallback_env() {
        let primary = resolve_api_key(
            None,
            DEFAULT_API_KEY_ENV,
            env(&[(DEFAULT_API_KEY_ENV, "sk-primary"), (FALLBACK_API_KEY_ENV, "sk-legacy")]),
        )
        .unwrap();
        assert_eq!(primary, "sk-primary");

        let legacy = resolve_api_key(
            None,
            DEFAULT_API_KEY_ENV,
            env(&[(FALLBACK_API_KEY_ENV, "sk-legacy")]),
        )
        .unwrap();
        assert_eq!(legacy, "sk-legacy");
    }

    #[test]
    fn test_missing_key() {
        let err = resolve_api_key(None, "MY_KEY", env(&[("MY_KEY", "  ")])).unwrap_err();
        assert_eq!(err, CapabilityError::MissingApiKey("MY_KEY".to_string()));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = OpenRouterConfig::new("sk").with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(
            OpenRouterConfig::new("sk").endpoint(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let config = OpenRouterConfig::new("sk")
            .with_base_url("http://127.0.0.1:9")
            .with_request_timeout(Some(Duration::from_secs(5)));
        let gateway = OpenRouterGateway::new(config).unwrap();

        let err = gateway
            .invoke(&Persona::critic(), "Vote.")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::Connection(_) | CapabilityError::RequestFailed(_)
        ));
    }
}

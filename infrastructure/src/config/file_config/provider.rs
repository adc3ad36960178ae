//! Provider configuration from TOML (`[provider]` section)

use crate::openrouter::gateway::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, OpenRouterConfig, resolve_api_key,
};
use council_application::CapabilityError;
use council_domain::Persona;
use council_domain::persona::{ARBITRATOR_TEMPERATURE, EVALUATOR_TEMPERATURE};
use serde::{Deserialize, Serialize};

/// OpenAI-compatible provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Model used by every persona.
    pub model: String,
    /// Environment variable name for the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Sampling temperature of the four evaluators.
    pub evaluator_temperature: f32,
    /// Sampling temperature of the arbitrator.
    pub arbitrator_temperature: f32,
    /// Max tokens per reply.
    pub max_tokens: Option<u32>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            evaluator_temperature: EVALUATOR_TEMPERATURE,
            arbitrator_temperature: ARBITRATOR_TEMPERATURE,
            max_tokens: None,
        }
    }
}

impl FileProviderConfig {
    /// Build the gateway settings, reading the API key from the environment.
    pub fn to_gateway_config(&self) -> Result<OpenRouterConfig, CapabilityError> {
        let api_key = resolve_api_key(self.api_key.as_deref(), &self.api_key_env, |name| {
            std::env::var(name).ok()
        })?;
        Ok(OpenRouterConfig::new(api_key)
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens))
    }

    /// The default council with the configured temperatures.
    pub fn personas(&self) -> (Vec<Persona>, Persona) {
        let evaluators = Persona::evaluators()
            .into_iter()
            .map(|p| p.with_temperature(self.evaluator_temperature))
            .collect();
        let arbitrator = Persona::supervisor().with_temperature(self.arbitrator_temperature);
        (evaluators, arbitrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_builds_config() {
        let provider = FileProviderConfig {
            api_key: Some("sk-test".to_string()),
            model: "anthropic/claude-3.5-haiku".to_string(),
            max_tokens: Some(512),
            ..Default::default()
        };
        let config = provider.to_gateway_config().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "anthropic/claude-3.5-haiku");
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    fn test_personas_use_configured_temperatures() {
        let provider = FileProviderConfig {
            evaluator_temperature: 1.1,
            arbitrator_temperature: 0.2,
            ..Default::default()
        };
        let (evaluators, arbitrator) = provider.personas();
        assert_eq!(evaluators.len(), 4);
        assert!(evaluators.iter().all(|p| (p.temperature - 1.1).abs() < f32::EPSILON));
        assert!((arbitrator.temperature - 0.2).abs() < f32::EPSILON);
    }
}

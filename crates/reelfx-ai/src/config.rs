//! Engine configuration.
//!
//! Provider lists and keys are injected through [`EngineConfig`] rather than
//! read from process globals, so tests can run the engine against scripted
//! providers with zero retry delay.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{AiError, AiResult};

/// OpenAI-compatible chat completions endpoint used by the default providers.
pub const DEFAULT_ENDPOINT: &str = "https://lightning.ai/api/v1/chat/completions";

/// Environment variable the default providers read their key from.
pub const DEFAULT_KEY_ENV: &str = "LIGHTNING_API_KEY";

/// One remote suggestion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Label used in logs and reports.
    pub name: String,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Read the key from this environment variable when `api_key` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub model_id: String,
}

impl ProviderConfig {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            api_key: None,
            api_key_env: None,
            model_id: model_id.into(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    pub fn has_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Image search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSearchConfig {
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Upper bound on results per query.
    pub per_page_limit: usize,
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pexels.com/v1/search".to_string(),
            api_key: None,
            api_key_env: Some("PEXELS_API_KEY".to_string()),
            per_page_limit: 15,
        }
    }
}

/// Configuration for the overlay assignment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Providers in the order they are tried.
    pub providers: Vec<ProviderConfig>,
    /// Attempts per provider for transient failures (429 / 5xx / timeouts).
    pub max_retries: u32,
    /// Fixed delay between attempts on the same provider.
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub images: ImageSearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let provider = |name: &str, model: &str| {
            ProviderConfig::new(name, DEFAULT_ENDPOINT, model).with_api_key_env(DEFAULT_KEY_ENV)
        };
        Self {
            providers: vec![
                provider("kimi", "lightning-ai/kimi-k2.5"),
                provider("deepseek", "lightning-ai/DeepSeek-V3.1"),
                provider("llama", "lightning-ai/llama-3.3-70b"),
            ],
            max_retries: 3,
            retry_delay_ms: 1500,
            request_timeout_secs: 60,
            images: ImageSearchConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Config with no remote providers: every request goes to the local fallback.
    pub fn offline() -> Self {
        Self {
            providers: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> AiResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AiResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), providers = config.providers.len(), "loaded engine config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> AiResult<String> {
        toml::to_string_pretty(self).map_err(|e| AiError::Config(e.to_string()))
    }

    pub fn validate(&self) -> AiResult<()> {
        for provider in &self.providers {
            if provider.endpoint.trim().is_empty() {
                return Err(AiError::Config(format!(
                    "provider '{}' has an empty endpoint",
                    provider.name
                )));
            }
            if provider.model_id.trim().is_empty() {
                return Err(AiError::Config(format!(
                    "provider '{}' has an empty model id",
                    provider.name
                )));
            }
        }
        Ok(())
    }

    /// Fill unset keys from their `api_key_env` variables.
    pub fn resolve_keys(mut self) -> Self {
        for provider in &mut self.providers {
            if provider.has_key() {
                continue;
            }
            if let Some(var) = provider.api_key_env.as_deref() {
                match std::env::var(var) {
                    Ok(key) if !key.is_empty() => provider.api_key = Some(key),
                    _ => warn!(provider = %provider.name, var, "API key variable not set"),
                }
            }
        }
        if self.images.api_key.is_none() {
            if let Some(var) = self.images.api_key_env.as_deref() {
                self.images.api_key = std::env::var(var).ok().filter(|k| !k.is_empty());
            }
        }
        self
    }

    pub fn with_providers(mut self, providers: Vec<ProviderConfig>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Upper bound on time spent in the cascade before falling back.
    pub fn worst_case_latency(&self) -> Duration {
        let attempts = self.providers.len() as u32 * self.max_retries.max(1);
        (self.request_timeout() + self.retry_delay()) * attempts
    }
}

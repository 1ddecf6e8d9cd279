//! Remote suggestion providers.
//!
//! A provider takes a prompt and returns the raw text of the model reply.
//! Everything that can go wrong is reported as a [`ProviderFailure`] that
//! says whether trying the same provider again could help.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::AiError;

/// Whether a failure is worth retrying on the same provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limits, server errors, timeouts, dropped connections.
    Transient,
    /// Client errors and unusable replies.
    Permanent,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transient => f.write_str("transient"),
            FailureKind::Permanent => f.write_str("permanent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {reason}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl ProviderFailure {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transient,
            reason: reason.into(),
        }
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Permanent,
            reason: reason.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind == FailureKind::Transient
    }
}

/// Only 429 and 5xx are retried.
pub fn classify_status(status: u16) -> FailureKind {
    if status == 429 || (500..600).contains(&status) {
        FailureKind::Transient
    } else {
        FailureKind::Permanent
    }
}

impl From<AiError> for ProviderFailure {
    fn from(err: AiError) -> Self {
        let kind = match &err {
            AiError::Http(e) if e.is_timeout() || e.is_connect() || e.is_request() => {
                FailureKind::Transient
            }
            AiError::Status { status, .. } => classify_status(*status),
            _ => FailureKind::Permanent,
        };
        Self {
            kind,
            reason: err.to_string(),
        }
    }
}

/// A remote model that turns a prompt into reply text.
#[async_trait]
pub trait OverlayProvider: Send + Sync {
    /// Label used in logs and attempt records.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderFailure>;
}

// ── OpenAI-compatible HTTP provider ────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions provider speaking the OpenAI wire format.
pub struct HttpProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig, timeout: Duration) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send(&self, prompt: &str) -> Result<String, AiError> {
        let body = ChatRequest {
            model: &self.config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(AiError::EmptyContent);
        }
        let preview: String = content.chars().take(120).collect();
        debug!(provider = %self.config.name, preview = %preview, "provider reply");
        Ok(content)
    }
}

#[async_trait]
impl OverlayProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderFailure> {
        self.send(prompt).await.map_err(ProviderFailure::from)
    }
}

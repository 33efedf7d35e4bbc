//! Outbound port for talking to model backends.
//!
//! The deliberation use cases depend only on this trait; the concrete
//! HTTP adapter lives in the infrastructure crate.

use async_trait::async_trait;
use council_domain::Model;
use serde_json::Value;
use thiserror::Error;

/// What can go wrong between us and a model backend.
///
/// These surface to users verbatim inside per-model failure entries, so the
/// messages are written for humans, not for matching.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("network error: {0}")]
    ConnectionError(String),

    #[error("authentication rejected: {0}")]
    AuthFailed(String),

    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// A single prompt for a single model. No conversation state is carried
/// between requests; each council stage builds its prompts from scratch.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub system: Option<String>,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            system: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A backend's answer.
#[derive(Debug, Clone)]
pub struct LlmReply {
    pub content: String,
    /// Provider-specific reasoning trace, passed through opaquely.
    pub reasoning: Option<Value>,
}

impl LlmReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            reasoning: None,
        }
    }
}

#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Performs one chat completion.
    async fn complete(&self, request: CompletionRequest) -> Result<LlmReply, GatewayError>;
}

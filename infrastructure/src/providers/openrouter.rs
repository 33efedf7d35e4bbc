//! OpenRouter adapter for chat completions.
//!
//! Implements the [`LlmGateway`] port over the OpenRouter
//! chat-completions API. One request per call, no streaming, no shared
//! conversation state between calls.

use std::time::Duration;

use async_trait::async_trait;
use council_application::ports::llm_gateway::{
    CompletionRequest, GatewayError, LlmGateway, LlmReply,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenRouter API adapter.
#[derive(Debug, Clone)]
pub struct OpenRouterGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterGateway {
    /// Create from an API key with default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_config(api_key, DEFAULT_BASE_URL, Some(DEFAULT_TIMEOUT))
    }

    /// Create by reading the API key from the named environment variable.
    pub fn from_env_var(var: &str) -> Result<Self, GatewayError> {
        let api_key = std::env::var(var)
            .map_err(|_| GatewayError::AuthFailed(format!("{var} is not set")))?;
        Self::with_config(api_key, DEFAULT_BASE_URL, Some(DEFAULT_TIMEOUT))
    }

    /// Create with custom configuration.
    ///
    /// `timeout` bounds the whole HTTP exchange; `None` leaves requests
    /// unbounded. The application layer may hold a shorter per-call
    /// bound on top of this one.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| GatewayError::AuthFailed("Invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            GatewayError::ConnectionError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// ==================== API types ====================

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    /// Provider-specific reasoning trace, kept opaque
    #[serde(default)]
    reasoning_details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str, model: &str) -> GatewayError {
    let detail = serde_json::from_str::<ChatApiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::AuthFailed(detail),
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(detail),
        _ => GatewayError::RequestFailed(detail),
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<LlmReply, GatewayError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ApiMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ApiMessage {
            role: "user",
            content: &request.prompt,
        });

        let api_request = ChatApiRequest {
            model: request.model.as_str(),
            messages,
        };

        debug!(model = %request.model, "POST chat/completions");
        let response = self
            .client
            .post(self.chat_url())
            .json(&api_request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(map_status_error(status, &body, request.model.as_str()));
        }

        let parsed: ChatApiResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::RequestFailed(format!("Invalid JSON from gateway: {e}"))
        })?;

        // OpenRouter reports some failures in a 200 body
        if let Some(error) = parsed.error {
            return Err(GatewayError::RequestFailed(
                error
                    .message
                    .unwrap_or_else(|| "unspecified gateway error".to_string()),
            ));
        }

        let message = parsed
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .ok_or(GatewayError::EmptyResponse)?;

        let content = message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        Ok(LlmReply {
            content,
            reasoning: message.reasoning_details,
        })
    }
}

//! Single model call wrapper
//!
//! [`ModelClient`] turns one gateway call into a [`ModelResponse`] value,
//! whatever happens on the wire. It is the unit of isolation that makes
//! partial failure possible upstream: a transport error, a timeout, or a
//! cancellation here becomes data, never an `Err` that could abort a
//! whole deliberation.

use std::sync::Arc;

use council_domain::{Model, ModelResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::CallOptions;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway, LlmReply};

pub struct ModelClient<G: LlmGateway> {
    gateway: Arc<G>,
    options: CallOptions,
}

impl<G: LlmGateway> ModelClient<G> {
    pub fn new(gateway: Arc<G>, options: CallOptions) -> Self {
        Self { gateway, options }
    }

    /// Perform one bounded model call
    ///
    /// Applies the configured per-call timeout and observes the
    /// cancellation token while the call is in flight. A timed-out call
    /// is recorded as a failure like any other transport error; only
    /// cancellation produces the distinct cancelled result.
    pub async fn call(
        &self,
        model: &Model,
        system: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> ModelResponse {
        if cancel.is_cancelled() {
            return ModelResponse::cancelled(model.clone());
        }

        debug!(model = %model, prompt_len = prompt.len(), "Dispatching model call");

        let request = CompletionRequest::new(model.clone(), prompt).with_system(system);

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(model = %model, "Model call cancelled");
                ModelResponse::cancelled(model.clone())
            }
            result = self.bounded_call(request) => match result {
                Ok(reply) => {
                    debug!(model = %model, response_len = reply.content.len(), "Model responded");
                    match reply.reasoning {
                        Some(reasoning) => {
                            ModelResponse::success_with_reasoning(model.clone(), reply.content, reasoning)
                        }
                        None => ModelResponse::success(model.clone(), reply.content),
                    }
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Model call failed");
                    ModelResponse::failure(model.clone(), e.to_string())
                }
            }
        }
    }

    async fn bounded_call(&self, request: CompletionRequest) -> Result<LlmReply, GatewayError> {
        match self.options.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.gateway.complete(request)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout),
            },
            None => self.gateway.complete(request).await,
        }
    }
}

//! Parallel fan-out over the council
//!
//! One concurrent [`ModelClient`] call per model, all settled before
//! returning, results in roster order. Individual failures are recorded
//! in the result, never escalated; the executor itself only errors when
//! there is nothing to schedule.

use std::sync::Arc;

use council_domain::{Model, ModelResponse, StageOneResult};
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::model_client::ModelClient;

#[derive(Error, Debug, PartialEq)]
pub enum ExecutorError {
    #[error("No models configured for the council")]
    EmptyCouncil,
}

pub struct ParallelExecutor<G: LlmGateway + 'static> {
    client: Arc<ModelClient<G>>,
}

impl<G: LlmGateway + 'static> ParallelExecutor<G> {
    pub fn new(client: Arc<ModelClient<G>>) -> Self {
        Self { client }
    }

    /// Fan one prompt per model out to the whole roster
    ///
    /// `prompt_fn` customizes the prompt per model (Stage 2 shows each
    /// evaluator everyone's answers but its own). The returned result
    /// holds exactly one entry per requested model, in roster order; a
    /// task that cannot report (it panicked) is folded in as a failure
    /// entry so the roster invariant survives even that.
    pub async fn run<F>(
        &self,
        models: &[Model],
        system: &str,
        prompt_fn: F,
        cancel: &CancellationToken,
    ) -> Result<StageOneResult, ExecutorError>
    where
        F: Fn(&Model) -> String,
    {
        if models.is_empty() {
            return Err(ExecutorError::EmptyCouncil);
        }

        let mut join_set = JoinSet::new();

        for (index, model) in models.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let model = model.clone();
            let system = system.to_string();
            let prompt = prompt_fn(&model);
            let cancel = cancel.clone();

            join_set.spawn(async move {
                let response = client.call(&model, &system, &prompt, &cancel).await;
                (index, response)
            });
        }

        let mut slots: Vec<Option<ModelResponse>> = vec![None; models.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, response)) => slots[index] = Some(response),
                Err(e) => warn!("Model task join error: {}", e),
            }
        }

        let responses = slots
            .into_iter()
            .zip(models)
            .map(|(slot, model)| {
                slot.unwrap_or_else(|| {
                    ModelResponse::failure(model.clone(), "model task aborted unexpectedly")
                })
            })
            .collect();

        Ok(StageOneResult::new(responses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CallOptions;
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmReply};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Echoes the model id back, after an optional per-model delay;
    /// models listed in `failing` error instead.
    struct EchoGateway {
        failing: Vec<&'static str>,
        slow: Vec<&'static str>,
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<LlmReply, GatewayError> {
            let id = request.model.as_str().to_string();
            if self.slow.iter().any(|s| *s == id) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            if self.failing.iter().any(|f| *f == id) {
                return Err(GatewayError::RequestFailed(format!("{} is down", id)));
            }
            Ok(LlmReply::text(format!("answer from {}", id)))
        }
    }

    fn executor(gateway: EchoGateway, options: CallOptions) -> ParallelExecutor<EchoGateway> {
        ParallelExecutor::new(Arc::new(ModelClient::new(Arc::new(gateway), options)))
    }

    fn council() -> Vec<Model> {
        vec![Model::Gpt51, Model::ClaudeSonnet45, Model::Grok4]
    }

    #[tokio::test]
    async fn test_all_success_one_entry_per_model() {
        let executor = executor(
            EchoGateway {
                failing: vec![],
                slow: vec![],
            },
            CallOptions::default(),
        );

        let result = executor
            .run(&council(), "sys", |_| "prompt".to_string(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.success_count(), 3);
        assert!(result.responses().iter().all(|r| r.error.is_none()));
    }

    #[tokio::test]
    async fn test_results_in_roster_order() {
        // make the first model slow enough to finish last
        let executor = executor(
            EchoGateway {
                failing: vec![],
                slow: vec!["openai/gpt-5.1"],
            },
            CallOptions {
                timeout: Some(Duration::from_millis(50)),
            },
        );

        let result = executor
            .run(&council(), "sys", |_| "prompt".to_string(), &CancellationToken::new())
            .await
            .unwrap();

        let order: Vec<_> = result.responses().iter().map(|r| r.model.clone()).collect();
        assert_eq!(order, council());
    }

    #[tokio::test]
    async fn test_partial_failure_recorded_not_escalated() {
        let executor = executor(
            EchoGateway {
                failing: vec!["anthropic/claude-sonnet-4.5"],
                slow: vec![],
            },
            CallOptions::default(),
        );

        let result = executor
            .run(&council(), "sys", |_| "prompt".to_string(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.success_count(), 2);
        let failed = result.get(&Model::ClaudeSonnet45).unwrap();
        assert!(failed.error.as_deref().unwrap().contains("is down"));
    }

    #[tokio::test]
    async fn test_empty_roster_is_the_only_error() {
        let executor = executor(
            EchoGateway {
                failing: vec![],
                slow: vec![],
            },
            CallOptions::default(),
        );

        let result = executor
            .run(&[], "sys", |_| "prompt".to_string(), &CancellationToken::new())
            .await;

        assert_eq!(result.unwrap_err(), ExecutorError::EmptyCouncil);
    }

    #[tokio::test]
    async fn test_per_model_prompts() {
        let executor = executor(
            EchoGateway {
                failing: vec![],
                slow: vec![],
            },
            CallOptions::default(),
        );

        // prompt_fn sees each model exactly once
        let result = executor
            .run(
                &council(),
                "sys",
                |model| format!("prompt for {}", model),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_cancellation_marks_all_outstanding() {
        let executor = executor(
            EchoGateway {
                failing: vec![],
                slow: vec!["openai/gpt-5.1", "anthropic/claude-sonnet-4.5", "x-ai/grok-4"],
            },
            CallOptions::default(),
        );

        let cancel = CancellationToken::new();
        let models = council();
        let run = executor.run(&models, "sys", |_| "prompt".to_string(), &cancel);
        let cancel_soon = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        };
        let (result, _) = tokio::join!(run, cancel_soon);

        let result = result.unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.responses().iter().all(|r| r.is_cancelled()));
    }
}

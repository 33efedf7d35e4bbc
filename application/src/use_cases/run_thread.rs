//! Run Thread use case
//!
//! A thread is a focused follow-up on a finished deliberation: the user
//! highlights passages, optionally pins whole segments, and sends one
//! instruction to a single model over that compiled context. No
//! council, no stages.

use std::sync::Arc;

use council_domain::{
    compile, CompileError, CompiledContext, ContextSegment, HighlightComment, Model,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::CallOptions;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::prompt_source::{DefaultPrompts, PromptSource};
use crate::use_cases::model_client::ModelClient;

#[derive(Error, Debug)]
pub enum RunThreadError {
    #[error(transparent)]
    Context(#[from] CompileError),

    #[error("Thread model failed: {0}")]
    ModelFailed(String),

    #[error("Thread cancelled")]
    Cancelled,
}

/// Input for the RunThread use case
#[derive(Debug, Clone, Default)]
pub struct RunThreadInput {
    /// Commented highlights, in the order the user made them
    pub comments: Vec<HighlightComment>,
    /// Segments pinned wholesale
    pub pinned: Vec<ContextSegment>,
    /// The single model that answers the thread
    pub model: Model,
    /// What the user wants done with the context
    pub instruction: String,
}

/// The thread model's answer, with the context it was shown
#[derive(Debug, Clone)]
pub struct ThreadReply {
    pub model: Model,
    pub content: String,
    pub context: CompiledContext,
}

/// Use case for running a follow-up thread over compiled context
pub struct RunThreadUseCase<G: LlmGateway + 'static> {
    client: Arc<ModelClient<G>>,
    prompts: Arc<dyn PromptSource>,
}

impl<G: LlmGateway + 'static> RunThreadUseCase<G> {
    pub fn new(gateway: Arc<G>, options: CallOptions) -> Self {
        Self {
            client: Arc::new(ModelClient::new(gateway, options)),
            prompts: Arc::new(DefaultPrompts),
        }
    }

    pub fn with_prompts(mut self, prompts: Arc<dyn PromptSource>) -> Self {
        self.prompts = prompts;
        self
    }

    pub async fn execute(&self, input: RunThreadInput) -> Result<ThreadReply, RunThreadError> {
        self.execute_with_cancel(input, CancellationToken::new())
            .await
    }

    /// Compile the context, then make the one model call
    ///
    /// Context compilation happens before anything goes over the wire,
    /// so an empty selection costs nothing.
    pub async fn execute_with_cancel(
        &self,
        input: RunThreadInput,
        cancel: CancellationToken,
    ) -> Result<ThreadReply, RunThreadError> {
        let context = compile(&input.comments, &input.pinned)?;
        debug!(
            highlights = context.highlight_count,
            segments = context.segments.len(),
            "Thread context compiled"
        );

        info!(model = %input.model, "Running thread");
        let system = self.prompts.thread_system();
        let prompt = self.prompts.thread_prompt(&context.text, &input.instruction);

        let response = self
            .client
            .call(&input.model, &system, &prompt, &cancel)
            .await;
        if response.is_cancelled() {
            return Err(RunThreadError::Cancelled);
        }
        match response.content {
            Some(content) => Ok(ThreadReply {
                model: input.model,
                content,
                context,
            }),
            None => {
                let message = response
                    .error
                    .unwrap_or_else(|| "no content returned".to_string());
                Err(RunThreadError::ModelFailed(message))
            }
        }
    }
}

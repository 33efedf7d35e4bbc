//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer; networking and
//! storage live behind the ports.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CallOptions, CouncilConfig};
pub use ports::{
    conversation_store::{ConversationStore, RecordKey},
    event_sink::{ChannelEmitter, EventSink, EventStream, FanoutSink, NullSink},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway, LlmReply},
    prompt_source::{DefaultPrompts, PromptSource},
};
pub use use_cases::executor::{ExecutorError, ParallelExecutor};
pub use use_cases::model_client::ModelClient;
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
pub use use_cases::run_thread::{RunThreadError, RunThreadInput, RunThreadUseCase, ThreadReply};

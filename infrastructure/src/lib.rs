//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenRouter HTTP gateway, configuration file
//! loading, and the JSONL conversation store.

pub mod config;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCouncilConfig, FileGatewayConfig, FileOutputConfig,
    FileStorageConfig,
};
pub use persistence::JsonlConversationStore;
pub use providers::OpenRouterGateway;

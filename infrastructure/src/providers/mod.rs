//! LLM provider adapters.
//!
//! All council traffic goes through OpenRouter; the adapter implements
//! the application's [`LlmGateway`](council_application::LlmGateway) port.

mod openrouter;

pub use openrouter::OpenRouterGateway;

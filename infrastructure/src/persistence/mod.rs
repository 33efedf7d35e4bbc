//! Persistence infrastructure — durable conversation records.
//!
//! Provides [`JsonlConversationStore`], a JSONL file writer that
//! implements the [`ConversationStore`](council_application::ConversationStore) port.

mod jsonl_store;

pub use jsonl_store::JsonlConversationStore;

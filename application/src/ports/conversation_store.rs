//! Port for durable conversation records.
//!
//! After a deliberation completes, its [`CouncilRecord`] is handed to
//! the store keyed by conversation id and message index. The store
//! never receives request-scoped metadata (anonymization map, aggregate
//! ranking); those are reconstructible only from the raw stage text and
//! are deliberately not durable.
//!
//! Not a logging facility: `tracing` carries diagnostics, this port
//! carries conversation content a UI could reload.

use council_domain::CouncilRecord;

/// Identifies where a record lands inside a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub conversation_id: String,
    pub message_index: usize,
}

impl RecordKey {
    pub fn new(conversation_id: impl Into<String>, message_index: usize) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message_index,
        }
    }
}

/// Port for appending council records to durable storage.
///
/// `append` is intentionally synchronous and non-fallible to avoid
/// disrupting the main execution flow; storage failures are the
/// adapter's to log and swallow.
pub trait ConversationStore: Send + Sync {
    fn append(&self, key: &RecordKey, record: &CouncilRecord);
}

//! The user's question, as handed to the council.

use serde::{Deserialize, Serialize};

/// A non-empty user query.
///
/// Every council member answers the same query independently in Stage 1;
/// later stages only ever see it embedded in prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    text: String,
}

impl Query {
    /// # Panics
    /// Panics when `text` is empty or whitespace-only. Use [`Query::try_new`]
    /// for unvalidated input.
    pub fn new(text: impl Into<String>) -> Self {
        Self::try_new(text).expect("query must not be empty")
    }

    /// Returns `None` when `text` is empty or whitespace-only.
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

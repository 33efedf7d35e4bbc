//! Reusable context pieces for follow-up threads

use serde::{Deserialize, Serialize};

use crate::core::model::Model;
use crate::deliberation::Stage;

/// Where a pinned segment originally came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentSource {
    /// A council response from an earlier deliberation
    Council,
    /// A standalone user note
    Notes,
}

/// A chunk of prior output pinned for reuse in a thread (Value Object)
///
/// Owned by the session collaborator; the compiler only reads it. Two
/// segments with the same [`SegmentKey`] are the same underlying
/// passage, regardless of id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSegment {
    pub id: String,
    pub source: SegmentSource,
    /// Display heading, e.g. "Stage 1 - gpt-5.1"
    pub label: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
}

impl ContextSegment {
    pub fn council(
        id: impl Into<String>,
        label: impl Into<String>,
        content: impl Into<String>,
        stage: Stage,
        model: Model,
    ) -> Self {
        Self {
            id: id.into(),
            source: SegmentSource::Council,
            label: label.into(),
            content: content.into(),
            stage: Some(stage),
            model: Some(model),
            note_id: None,
        }
    }

    pub fn note(
        id: impl Into<String>,
        label: impl Into<String>,
        content: impl Into<String>,
        note_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: SegmentSource::Notes,
            label: label.into(),
            content: content.into(),
            stage: None,
            model: None,
            note_id: Some(note_id.into()),
        }
    }

    /// The identity of the underlying passage
    pub fn key(&self) -> SegmentKey {
        SegmentKey {
            source: self.source,
            stage: self.stage,
            model: self.model.clone(),
            note_id: self.note_id.clone(),
        }
    }
}

/// Composite dedup key: the same passage must never enter a compiled
/// context twice, even when pinned through different routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentKey {
    pub source: SegmentSource,
    pub stage: Option<Stage>,
    pub model: Option<Model>,
    pub note_id: Option<String>,
}

/// A user highlight over prior output, with the note they attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightComment {
    /// The highlighted passage, possibly empty for a free-standing comment
    pub selection: String,
    pub comment: String,
    /// The segment this highlight was made on, when the session
    /// collaborator derives one automatically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<ContextSegment>,
}

impl HighlightComment {
    pub fn new(selection: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            comment: comment.into(),
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: ContextSegment) -> Self {
        self.segment = Some(segment);
        self
    }
}

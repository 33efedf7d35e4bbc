//! Context compilation for follow-up threads
//!
//! A thread continues a conversation about material the user selected
//! from prior council output: highlighted passages with comments, and
//! pinned segments. The compiler merges both into one deterministic
//! text block. It runs before any model call, so an empty selection is
//! rejected here rather than producing a context-free thread.

use thiserror::Error;

use super::segment::{ContextSegment, HighlightComment, SegmentKey};

#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("No highlights or pinned segments to build context from")]
    InsufficientContext,
}

/// The compiled context block plus the structured pieces it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledContext {
    pub text: String,
    pub highlight_count: usize,
    /// Segments actually included, manual pins first, deduplicated
    pub segments: Vec<ContextSegment>,
}

/// Merge highlights and pinned segments into one context block
///
/// Output layout is fixed: the highlights section first, then the
/// pinned-segments section, blocks separated by blank lines. Within the
/// pinned section, manually pinned segments keep their given order and
/// come before segments auto-derived from highlights; any auto-derived
/// segment whose key matches an already included one is dropped.
pub fn compile(
    comments: &[HighlightComment],
    pinned: &[ContextSegment],
) -> Result<CompiledContext, CompileError> {
    if comments.is_empty() && pinned.is_empty() {
        return Err(CompileError::InsufficientContext);
    }

    let segments = collect_segments(comments, pinned);

    let mut blocks: Vec<String> = Vec::new();

    if !comments.is_empty() {
        blocks.push("Highlighted excerpts:".to_string());
        for comment in comments {
            blocks.push(render_highlight(comment));
        }
    }

    if !segments.is_empty() {
        blocks.push("Pinned segments:".to_string());
        for segment in &segments {
            blocks.push(format!("--- {} ---\n{}", segment.label, segment.content));
        }
    }

    Ok(CompiledContext {
        text: blocks.join("\n\n"),
        highlight_count: comments.len(),
        segments,
    })
}

fn render_highlight(comment: &HighlightComment) -> String {
    if comment.selection.is_empty() {
        format!("Comment: {}", comment.comment)
    } else {
        format!("> {}\nComment: {}", comment.selection, comment.comment)
    }
}

/// Manual pins in given order, then highlight-derived segments, without
/// ever repeating a passage
fn collect_segments(
    comments: &[HighlightComment],
    pinned: &[ContextSegment],
) -> Vec<ContextSegment> {
    let mut segments: Vec<ContextSegment> = Vec::new();
    let mut seen: Vec<SegmentKey> = Vec::new();

    for segment in pinned {
        let key = segment.key();
        if !seen.contains(&key) {
            seen.push(key);
            segments.push(segment.clone());
        }
    }

    for derived in comments.iter().filter_map(|c| c.segment.as_ref()) {
        let key = derived.key();
        if !seen.contains(&key) {
            seen.push(key);
            segments.push(derived.clone());
        }
    }

    segments
}

//! Thread-context compilation from highlights and pinned segments.

pub mod compiler;
pub mod segment;

pub use compiler::{compile, CompileError, CompiledContext};
pub use segment::{ContextSegment, HighlightComment, SegmentKey, SegmentSource};

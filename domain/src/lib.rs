//! Domain layer for llm-council
//!
//! This crate contains the core deliberation logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is a roster of independently configured models that answer
//! the same query in three sequential stages:
//!
//! - **Stage 1 (Collect)**: every model answers independently, in parallel
//! - **Stage 2 (Rank)**: models rank each other's anonymized answers
//! - **Stage 3 (Synthesize)**: a chairman model writes the final answer
//!
//! ## Partial failure
//!
//! Individual model failures are data, not errors. A deliberation only
//! fails outright when Stage 1 produces zero answers or the chairman
//! cannot synthesize.

pub mod config;
pub mod context;
pub mod core;
pub mod deliberation;
pub mod events;
pub mod prompt;
pub mod ranking;

// Re-export commonly used types
pub use config::{
    has_errors, validate_council, ConfigIssue, ConfigIssueCode, OutputFormat, Severity,
};
pub use context::{
    compile, CompileError, CompiledContext, ContextSegment, HighlightComment, SegmentKey,
    SegmentSource,
};
pub use core::{model::Model, query::Query};
pub use deliberation::{
    anonymize, AnonymizationMap, CouncilRecord, DeliberationMetadata, DeliberationResult,
    DeliberationStatus, Label, LabeledResponse, ModelResponse, RankedEvaluation, RecordedAnswer,
    RecordedRanking, Stage, StageOneResult, SynthesisResult,
};
pub use events::{DeliberationEvent, Transcript};
pub use prompt::PromptTemplate;
pub use ranking::{aggregate, parse_ranking, AggregateRanking, RankedScore, RANKING_MARKER};

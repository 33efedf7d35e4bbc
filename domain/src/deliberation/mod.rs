//! Deliberation entities: stages, responses, anonymization.

pub mod anonymizer;
pub mod stage;
pub mod value_objects;

pub use anonymizer::{anonymize, AnonymizationMap, Label, LabeledResponse};
pub use stage::{DeliberationStatus, Stage};
pub use value_objects::{
    CouncilRecord, DeliberationMetadata, DeliberationResult, ModelResponse, RankedEvaluation,
    RecordedAnswer, RecordedRanking, StageOneResult, SynthesisResult,
};

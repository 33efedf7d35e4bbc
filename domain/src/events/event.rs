//! Progress events emitted during a deliberation

use serde::{Deserialize, Serialize};

use crate::deliberation::{
    AnonymizationMap, RankedEvaluation, Stage, StageOneResult, SynthesisResult,
};
use crate::ranking::AggregateRanking;

/// Ordered progress events for one deliberation
///
/// Emitted strictly in sequence: each stage's `*_start` precedes its
/// `*_complete`, and `*_complete` for stage N precedes `*_start` for
/// stage N+1. A run ends with exactly one terminal event: `complete`,
/// `error`, or `cancelled`. On the wire each event is a tagged object
/// `{"type": "...", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DeliberationEvent {
    Stage1Start,
    Stage1Complete {
        responses: StageOneResult,
    },
    Stage2Start,
    Stage2Complete {
        evaluations: Vec<RankedEvaluation>,
        anonymization: AnonymizationMap,
        aggregate: AggregateRanking,
    },
    Stage3Start,
    Stage3Complete {
        synthesis: SynthesisResult,
    },
    Complete,
    Error {
        message: String,
    },
    Cancelled,
}

impl DeliberationEvent {
    /// The wire name of this event
    pub fn event_type(&self) -> &'static str {
        match self {
            DeliberationEvent::Stage1Start => "stage1_start",
            DeliberationEvent::Stage1Complete { .. } => "stage1_complete",
            DeliberationEvent::Stage2Start => "stage2_start",
            DeliberationEvent::Stage2Complete { .. } => "stage2_complete",
            DeliberationEvent::Stage3Start => "stage3_start",
            DeliberationEvent::Stage3Complete { .. } => "stage3_complete",
            DeliberationEvent::Complete => "complete",
            DeliberationEvent::Error { .. } => "error",
            DeliberationEvent::Cancelled => "cancelled",
        }
    }

    /// The stage this event belongs to, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DeliberationEvent::Stage1Start | DeliberationEvent::Stage1Complete { .. } => {
                Some(Stage::Collect)
            }
            DeliberationEvent::Stage2Start | DeliberationEvent::Stage2Complete { .. } => {
                Some(Stage::Rank)
            }
            DeliberationEvent::Stage3Start | DeliberationEvent::Stage3Complete { .. } => {
                Some(Stage::Synthesize)
            }
            _ => None,
        }
    }

    /// Whether this event ends the run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliberationEvent::Complete
                | DeliberationEvent::Error { .. }
                | DeliberationEvent::Cancelled
        )
    }
}

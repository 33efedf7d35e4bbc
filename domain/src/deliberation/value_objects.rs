//! Value objects carried through a council deliberation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::model::Model;
use crate::core::query::Query;
use crate::ranking::AggregateRanking;

use super::anonymizer::{AnonymizationMap, Label};

/// Outcome of a single model call (Value Object)
///
/// Exactly one of `content` or `error` is set, except for a call that was
/// cancelled before producing either, which carries neither. A failed or
/// cancelled call is data, not an `Err`: one model going down must not
/// sink the deliberation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Provider-specific reasoning trace, passed through opaquely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelResponse {
    pub fn success(model: Model, content: impl Into<String>) -> Self {
        Self {
            model,
            content: Some(content.into()),
            reasoning: None,
            error: None,
        }
    }

    pub fn success_with_reasoning(
        model: Model,
        content: impl Into<String>,
        reasoning: Value,
    ) -> Self {
        Self {
            model,
            content: Some(content.into()),
            reasoning: Some(reasoning),
            error: None,
        }
    }

    pub fn failure(model: Model, error: impl Into<String>) -> Self {
        Self {
            model,
            content: None,
            reasoning: None,
            error: Some(error.into()),
        }
    }

    pub fn cancelled(model: Model) -> Self {
        Self {
            model,
            content: None,
            reasoning: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.content.is_some()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.content.is_none() && self.error.is_none()
    }
}

/// All Stage-1 responses in council roster order (Value Object)
///
/// Holds one entry per requested model, failures included, so downstream
/// consumers can always correlate positions with the configured roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageOneResult {
    responses: Vec<ModelResponse>,
}

impl StageOneResult {
    pub fn new(responses: Vec<ModelResponse>) -> Self {
        Self { responses }
    }

    pub fn responses(&self) -> &[ModelResponse] {
        &self.responses
    }

    /// The response from a specific model, if it was part of the council
    pub fn get(&self, model: &Model) -> Option<&ModelResponse> {
        self.responses.iter().find(|r| &r.model == model)
    }

    /// Responses that produced content, in roster order
    pub fn successful(&self) -> impl Iterator<Item = &ModelResponse> {
        self.responses.iter().filter(|r| r.is_success())
    }

    /// Responses that failed or were cancelled, in roster order
    pub fn failed(&self) -> impl Iterator<Item = &ModelResponse> {
        self.responses.iter().filter(|r| !r.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_success()).count()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// True when not a single model produced an answer
    pub fn is_total_failure(&self) -> bool {
        self.success_count() == 0
    }
}

/// One evaluator's Stage-2 output: the raw text it returned and the
/// ranking parsed out of it (Value Object)
///
/// `ranking` is always a duplicate-free subset of the labels the
/// evaluator was shown; an unparseable evaluation keeps its text and an
/// empty ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEvaluation {
    pub evaluator: Model,
    pub text: String,
    pub ranking: Vec<Label>,
}

impl RankedEvaluation {
    pub fn new(evaluator: Model, text: impl Into<String>, ranking: Vec<Label>) -> Self {
        Self {
            evaluator,
            text: text.into(),
            ranking,
        }
    }
}

/// The chairman's synthesized answer (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub chairman: Model,
    pub content: String,
}

impl SynthesisResult {
    pub fn new(chairman: Model, content: impl Into<String>) -> Self {
        Self {
            chairman,
            content: content.into(),
        }
    }
}

/// Request-scoped byproducts of a deliberation
///
/// Useful for display (leaderboards, de-anonymized rankings) but never
/// part of the durable conversation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationMetadata {
    pub anonymization: AnonymizationMap,
    pub aggregate: AggregateRanking,
}

/// Everything a completed deliberation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliberationResult {
    pub query: Query,
    pub council: Vec<Model>,
    pub stage_one: StageOneResult,
    pub evaluations: Vec<RankedEvaluation>,
    pub synthesis: SynthesisResult,
    pub metadata: DeliberationMetadata,
}

impl DeliberationResult {
    /// The durable record for the conversation store
    ///
    /// Carries the three stages only. The anonymization map and the
    /// aggregate ranking stay request-scoped.
    pub fn to_record(&self) -> CouncilRecord {
        CouncilRecord {
            role: "assistant".to_string(),
            stage1: self
                .stage_one
                .successful()
                .filter_map(|r| {
                    r.content.as_ref().map(|content| RecordedAnswer {
                        model: r.model.as_str().to_string(),
                        response: content.clone(),
                    })
                })
                .collect(),
            stage2: self
                .evaluations
                .iter()
                .map(|e| RecordedRanking {
                    model: e.evaluator.as_str().to_string(),
                    ranking: e.text.clone(),
                })
                .collect(),
            stage3: RecordedAnswer {
                model: self.synthesis.chairman.as_str().to_string(),
                response: self.synthesis.content.clone(),
            },
        }
    }
}

/// Durable conversation-store message for one completed deliberation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilRecord {
    pub role: String,
    pub stage1: Vec<RecordedAnswer>,
    pub stage2: Vec<RecordedRanking>,
    pub stage3: RecordedAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub model: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRanking {
    pub model: String,
    pub ranking: String,
}

//! Pure fold from an event stream to a deliberation snapshot
//!
//! Consumers that only see the event stream (a UI, a relay, a test) can
//! rebuild the state of a running deliberation by folding events into a
//! [`Transcript`]. The fold is pure, needs no engine handle, and admits
//! only the legal stage transitions; an out-of-order event leaves the
//! snapshot untouched.

use serde::{Deserialize, Serialize};

use crate::deliberation::{
    DeliberationMetadata, DeliberationStatus, RankedEvaluation, StageOneResult, SynthesisResult,
};

use super::event::DeliberationEvent;

/// Snapshot of a deliberation rebuilt from its events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    status: DeliberationStatus,
    stage_one: Option<StageOneResult>,
    evaluations: Vec<RankedEvaluation>,
    metadata: Option<DeliberationMetadata>,
    synthesis: Option<SynthesisResult>,
    error: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the snapshot
    ///
    /// Terminal states absorb every further event. An event that is not
    /// legal in the current state is dropped, so a consumer fed a
    /// corrupted stream degrades to a stale snapshot instead of an
    /// inconsistent one.
    pub fn apply(mut self, event: &DeliberationEvent) -> Transcript {
        use DeliberationEvent as E;
        use DeliberationStatus as S;

        if self.status.is_terminal() {
            return self;
        }

        match (self.status, event) {
            (S::Idle, E::Stage1Start) => self.status = S::Stage1Running,
            (S::Stage1Running, E::Stage1Complete { responses }) => {
                self.stage_one = Some(responses.clone());
                self.status = S::Stage1Done;
            }
            (S::Stage1Done, E::Stage2Start) => self.status = S::Stage2Running,
            (
                S::Stage2Running,
                E::Stage2Complete {
                    evaluations,
                    anonymization,
                    aggregate,
                },
            ) => {
                self.evaluations = evaluations.clone();
                self.metadata = Some(DeliberationMetadata {
                    anonymization: anonymization.clone(),
                    aggregate: aggregate.clone(),
                });
                self.status = S::Stage2Done;
            }
            (S::Stage2Done, E::Stage3Start) => self.status = S::Stage3Running,
            (S::Stage3Running, E::Stage3Complete { synthesis }) => {
                self.synthesis = Some(synthesis.clone());
            }
            (S::Stage3Running, E::Complete) if self.synthesis.is_some() => {
                self.status = S::Complete;
            }
            (_, E::Error { message }) => {
                self.error = Some(message.clone());
                self.status = S::Failed;
            }
            (_, E::Cancelled) => self.status = S::Cancelled,
            // out-of-order event, keep the last consistent snapshot
            _ => {}
        }
        self
    }

    /// Fold a whole event sequence
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a DeliberationEvent>) -> Transcript {
        events
            .into_iter()
            .fold(Transcript::new(), |state, event| state.apply(event))
    }

    pub fn status(&self) -> DeliberationStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn stage_one(&self) -> Option<&StageOneResult> {
        self.stage_one.as_ref()
    }

    pub fn evaluations(&self) -> &[RankedEvaluation] {
        &self.evaluations
    }

    pub fn metadata(&self) -> Option<&DeliberationMetadata> {
        self.metadata.as_ref()
    }

    pub fn synthesis(&self) -> Option<&SynthesisResult> {
        self.synthesis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::deliberation::{anonymize, Label, ModelResponse};
    use crate::ranking::aggregate;

    fn happy_path_events() -> Vec<DeliberationEvent> {
        let stage_one = StageOneResult::new(vec![
            ModelResponse::success(Model::Gpt51, "first answer"),
            ModelResponse::success(Model::ClaudeSonnet45, "second answer"),
        ]);
        let (_, anonymization) = anonymize(&stage_one);
        let evaluations = vec![RankedEvaluation::new(
            Model::Gpt51,
            "FINAL RANKING:\n1. Response B",
            vec![Label::new("Response B")],
        )];
        let agg = aggregate(&evaluations);

        vec![
            DeliberationEvent::Stage1Start,
            DeliberationEvent::Stage1Complete {
                responses: stage_one,
            },
            DeliberationEvent::Stage2Start,
            DeliberationEvent::Stage2Complete {
                evaluations,
                anonymization,
                aggregate: agg,
            },
            DeliberationEvent::Stage3Start,
            DeliberationEvent::Stage3Complete {
                synthesis: SynthesisResult::new(Model::Gemini3Pro, "the final answer"),
            },
            DeliberationEvent::Complete,
        ]
    }

    #[test]
    fn test_replay_rebuilds_completed_run() {
        let transcript = Transcript::replay(&happy_path_events());

        assert_eq!(transcript.status(), DeliberationStatus::Complete);
        assert_eq!(transcript.stage_one().map(|s| s.len()), Some(2));
        assert_eq!(transcript.evaluations().len(), 1);
        assert_eq!(
            transcript.synthesis().map(|s| s.content.as_str()),
            Some("the final answer")
        );
        let metadata = transcript.metadata().unwrap();
        assert_eq!(metadata.anonymization.len(), 2);
        assert_eq!(
            metadata.aggregate.leader().map(|s| s.label.clone()),
            Some(Label::new("Response B"))
        );
    }

    #[test]
    fn test_intermediate_states() {
        let events = happy_path_events();
        let after_two = Transcript::replay(events.iter().take(2));
        assert_eq!(after_two.status(), DeliberationStatus::Stage1Done);
        assert!(after_two.synthesis().is_none());

        let after_five = Transcript::replay(events.iter().take(5));
        assert_eq!(after_five.status(), DeliberationStatus::Stage3Running);
    }

    #[test]
    fn test_out_of_order_event_ignored() {
        let transcript = Transcript::new().apply(&DeliberationEvent::Stage3Start);
        assert_eq!(transcript.status(), DeliberationStatus::Idle);

        let transcript = Transcript::new()
            .apply(&DeliberationEvent::Stage1Start)
            .apply(&DeliberationEvent::Stage2Start);
        assert_eq!(transcript.status(), DeliberationStatus::Stage1Running);
    }

    #[test]
    fn test_error_event_fails_run() {
        let transcript = Transcript::new()
            .apply(&DeliberationEvent::Stage1Start)
            .apply(&DeliberationEvent::Error {
                message: "all council models failed".to_string(),
            });
        assert_eq!(transcript.status(), DeliberationStatus::Failed);
        assert_eq!(transcript.error(), Some("all council models failed"));
    }

    #[test]
    fn test_cancelled_is_terminal_and_absorbing() {
        let transcript = Transcript::new()
            .apply(&DeliberationEvent::Stage1Start)
            .apply(&DeliberationEvent::Cancelled)
            .apply(&DeliberationEvent::Stage1Complete {
                responses: StageOneResult::new(vec![]),
            })
            .apply(&DeliberationEvent::Complete);
        assert_eq!(transcript.status(), DeliberationStatus::Cancelled);
        assert!(transcript.stage_one().is_none());
    }

    #[test]
    fn test_terminal_absorbs_error() {
        let transcript = Transcript::replay(&happy_path_events()).apply(&DeliberationEvent::Error {
            message: "late".to_string(),
        });
        assert_eq!(transcript.status(), DeliberationStatus::Complete);
        assert!(transcript.error().is_none());
    }
}

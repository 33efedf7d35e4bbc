//! Run Council use case
//!
//! Orchestrates the full three-stage deliberation flow: independent
//! answers, anonymized peer ranking, chairman synthesis. Stages run
//! strictly in sequence (Stage 2 prompts are built from Stage 1 text),
//! progress flows out through an [`EventSink`], and partial failure is
//! tolerated everywhere below the total-stage-failure threshold.

use std::sync::Arc;

use council_domain::{
    aggregate, anonymize, parse_ranking, AnonymizationMap, DeliberationEvent, DeliberationMetadata,
    DeliberationResult, Label, LabeledResponse, Model, Query, RankedEvaluation, StageOneResult,
    SynthesisResult,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{CallOptions, CouncilConfig};
use crate::ports::conversation_store::{ConversationStore, RecordKey};
use crate::ports::event_sink::{EventSink, NullSink};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::prompt_source::{DefaultPrompts, PromptSource};
use crate::use_cases::executor::{ExecutorError, ParallelExecutor};
use crate::use_cases::model_client::ModelClient;

/// Errors that end a deliberation
///
/// Everything below these thresholds is absorbed as data: a failed
/// model call becomes an error entry, an unparseable ranking becomes an
/// empty one.
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No models configured for the council")]
    EmptyCouncil,

    #[error("All council models failed to respond")]
    AllModelsFailed,

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Deliberation cancelled")]
    Cancelled,
}

impl From<ExecutorError> for RunCouncilError {
    fn from(e: ExecutorError) -> Self {
        match e {
            ExecutorError::EmptyCouncil => RunCouncilError::EmptyCouncil,
        }
    }
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The question the council deliberates over
    pub query: Query,
    /// Council members, roster order
    pub council: Vec<Model>,
    /// The model that synthesizes the final answer
    pub chairman: Model,
    /// Where to append the durable record, when the caller wants one
    pub persist_to: Option<RecordKey>,
}

impl RunCouncilInput {
    pub fn new(query: impl Into<Query>, config: &CouncilConfig) -> Self {
        Self {
            query: query.into(),
            council: config.models().to_vec(),
            chairman: config.chairman().clone(),
            persist_to: None,
        }
    }

    pub fn persisted_at(mut self, key: RecordKey) -> Self {
        self.persist_to = Some(key);
        self
    }
}

/// Use case for running a full council deliberation
pub struct RunCouncilUseCase<G: LlmGateway + 'static> {
    client: Arc<ModelClient<G>>,
    executor: ParallelExecutor<G>,
    prompts: Arc<dyn PromptSource>,
    store: Option<Arc<dyn ConversationStore>>,
}

impl<G: LlmGateway + 'static> RunCouncilUseCase<G> {
    pub fn new(gateway: Arc<G>, options: CallOptions) -> Self {
        let client = Arc::new(ModelClient::new(gateway, options));
        Self {
            executor: ParallelExecutor::new(Arc::clone(&client)),
            client,
            prompts: Arc::new(DefaultPrompts),
            store: None,
        }
    }

    /// Replace the built-in prompt templates
    pub fn with_prompts(mut self, prompts: Arc<dyn PromptSource>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Attach a conversation store for durable records
    pub fn with_store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Execute without event delivery or cancellation
    pub async fn execute(
        &self,
        input: RunCouncilInput,
    ) -> Result<DeliberationResult, RunCouncilError> {
        self.execute_with_sink(input, &NullSink, CancellationToken::new())
            .await
    }

    /// Execute, pushing ordered progress events into `sink`
    ///
    /// Event order is fixed: each stage's start precedes its completion
    /// and the next stage's start; the run ends with exactly one of
    /// `complete`, `error`, or `cancelled`.
    pub async fn execute_with_sink(
        &self,
        input: RunCouncilInput,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<DeliberationResult, RunCouncilError> {
        if input.council.is_empty() {
            let error = RunCouncilError::EmptyCouncil;
            sink.emit(&DeliberationEvent::Error {
                message: error.to_string(),
            });
            return Err(error);
        }

        info!(models = input.council.len(), "Starting council deliberation");

        // Stage 1: independent answers
        sink.emit(&DeliberationEvent::Stage1Start);
        let stage_one = self.stage_one(&input, &cancel).await?;
        self.ensure_not_cancelled(&cancel, sink)?;

        if stage_one.is_total_failure() {
            warn!("All council models failed in Stage 1");
            let error = RunCouncilError::AllModelsFailed;
            sink.emit(&DeliberationEvent::Error {
                message: error.to_string(),
            });
            return Err(error);
        }

        info!(
            successes = stage_one.success_count(),
            failures = stage_one.len() - stage_one.success_count(),
            "Stage 1 complete"
        );
        sink.emit(&DeliberationEvent::Stage1Complete {
            responses: stage_one.clone(),
        });

        // Stage 2: anonymized peer ranking
        sink.emit(&DeliberationEvent::Stage2Start);
        let (labeled, anonymization) = anonymize(&stage_one);
        let evaluations = self
            .stage_two(&input, &labeled, &anonymization, &cancel)
            .await?;
        self.ensure_not_cancelled(&cancel, sink)?;

        let aggregate_ranking = aggregate(&evaluations);
        sink.emit(&DeliberationEvent::Stage2Complete {
            evaluations: evaluations.clone(),
            anonymization: anonymization.clone(),
            aggregate: aggregate_ranking.clone(),
        });

        // Stage 3: chairman synthesis
        sink.emit(&DeliberationEvent::Stage3Start);
        let synthesis = match self
            .stage_three(&input, &labeled, &evaluations, &cancel)
            .await
        {
            Ok(synthesis) => synthesis,
            Err(RunCouncilError::Cancelled) => {
                info!("Deliberation cancelled during synthesis");
                sink.emit(&DeliberationEvent::Cancelled);
                return Err(RunCouncilError::Cancelled);
            }
            Err(error) => {
                warn!(error = %error, "Synthesis failed");
                sink.emit(&DeliberationEvent::Error {
                    message: error.to_string(),
                });
                return Err(error);
            }
        };
        sink.emit(&DeliberationEvent::Stage3Complete {
            synthesis: synthesis.clone(),
        });
        sink.emit(&DeliberationEvent::Complete);

        let result = DeliberationResult {
            query: input.query.clone(),
            council: input.council.clone(),
            stage_one,
            evaluations,
            synthesis,
            metadata: DeliberationMetadata {
                anonymization,
                aggregate: aggregate_ranking,
            },
        };

        if let (Some(store), Some(key)) = (&self.store, &input.persist_to) {
            debug!(
                conversation = %key.conversation_id,
                index = key.message_index,
                "Appending council record"
            );
            store.append(key, &result.to_record());
        }

        Ok(result)
    }

    /// Stage 1: every council member answers independently
    async fn stage_one(
        &self,
        input: &RunCouncilInput,
        cancel: &CancellationToken,
    ) -> Result<StageOneResult, RunCouncilError> {
        info!("Stage 1: Independent Answers");
        let system = self.prompts.stage_one_system();
        let query = input.query.as_str();

        let result = self
            .executor
            .run(
                &input.council,
                &system,
                |_| self.prompts.stage_one_prompt(query),
                cancel,
            )
            .await?;
        Ok(result)
    }

    /// Stage 2: each successful answerer ranks the others' answers
    ///
    /// An evaluator is never shown its own response. With fewer than two
    /// successful answers there is nothing to show anyone, so the stage
    /// passes through with zero evaluations.
    async fn stage_two(
        &self,
        input: &RunCouncilInput,
        labeled: &[LabeledResponse],
        anonymization: &AnonymizationMap,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedEvaluation>, RunCouncilError> {
        if labeled.len() < 2 {
            debug!("Fewer than two answers, skipping peer ranking");
            return Ok(Vec::new());
        }

        let evaluators: Vec<Model> = anonymization
            .pairs()
            .iter()
            .map(|(_, model)| model.clone())
            .collect();
        info!(evaluators = evaluators.len(), "Stage 2: Peer Ranking");

        let system = self.prompts.ranking_system();
        let query = input.query.as_str();

        let ranking_calls = self
            .executor
            .run(
                &evaluators,
                &system,
                |model| {
                    let own = anonymization.label_for(model);
                    let others: Vec<LabeledResponse> = labeled
                        .iter()
                        .filter(|lr| Some(&lr.label) != own)
                        .cloned()
                        .collect();
                    self.prompts.ranking_prompt(query, &others)
                },
                cancel,
            )
            .await?;

        let mut evaluations = Vec::new();
        for response in ranking_calls.responses() {
            let Some(text) = &response.content else {
                if !response.is_cancelled() {
                    warn!(model = %response.model, "Evaluator failed, skipping its ranking");
                }
                continue;
            };

            let own = anonymization.label_for(&response.model);
            let known: Vec<Label> = labeled
                .iter()
                .map(|lr| lr.label.clone())
                .filter(|label| Some(label) != own)
                .collect();

            let ranking = parse_ranking(text, &known);
            if ranking.is_empty() {
                warn!(model = %response.model, "Could not parse a ranking, keeping raw text only");
            }
            evaluations.push(RankedEvaluation::new(
                response.model.clone(),
                text.clone(),
                ranking,
            ));
        }
        Ok(evaluations)
    }

    /// Stage 3: the chairman synthesizes the final answer
    async fn stage_three(
        &self,
        input: &RunCouncilInput,
        labeled: &[LabeledResponse],
        evaluations: &[RankedEvaluation],
        cancel: &CancellationToken,
    ) -> Result<SynthesisResult, RunCouncilError> {
        info!(chairman = %input.chairman, "Stage 3: Chairman Synthesis");

        let evaluation_texts: Vec<String> =
            evaluations.iter().map(|e| e.text.clone()).collect();
        let system = self.prompts.synthesis_system();
        let prompt =
            self.prompts
                .synthesis_prompt(input.query.as_str(), labeled, &evaluation_texts);
        debug!(prompt_len = prompt.len(), "Synthesis prompt built");

        let response = self
            .client
            .call(&input.chairman, &system, &prompt, cancel)
            .await;
        if response.is_cancelled() {
            return Err(RunCouncilError::Cancelled);
        }
        match response.content {
            Some(content) => Ok(SynthesisResult::new(input.chairman.clone(), content)),
            None => {
                let message = response
                    .error
                    .unwrap_or_else(|| "no content returned".to_string());
                Err(RunCouncilError::SynthesisFailed(message))
            }
        }
    }

    fn ensure_not_cancelled(
        &self,
        cancel: &CancellationToken,
        sink: &dyn EventSink,
    ) -> Result<(), RunCouncilError> {
        if cancel.is_cancelled() {
            info!("Deliberation cancelled");
            sink.emit(&DeliberationEvent::Cancelled);
            return Err(RunCouncilError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_sink::ChannelEmitter;
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmReply};
    use async_trait::async_trait;
    use council_domain::{CouncilRecord, DeliberationStatus, Transcript};
    use std::collections::HashMap;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    enum Script {
        Reply(&'static str),
        Fail(&'static str),
        Hang,
    }

    /// Pops one scripted reply per call, per model. Council stages are
    /// sequential barriers, so each model's calls arrive in a fixed
    /// order and a queue per model scripts a whole deliberation.
    struct ScriptedGateway {
        scripts: Mutex<HashMap<&'static str, VecDeque<Script>>>,
    }

    impl ScriptedGateway {
        fn new(scripts: Vec<(&'static str, Vec<Script>)>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(
                    scripts
                        .into_iter()
                        .map(|(model, queue)| (model, queue.into_iter().collect()))
                        .collect(),
                ),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<LlmReply, GatewayError> {
            let next = {
                let mut scripts = self.scripts.lock().unwrap();
                scripts
                    .get_mut(request.model.as_str())
                    .and_then(|queue| queue.pop_front())
            };
            match next {
                Some(Script::Reply(text)) => Ok(LlmReply::text(text)),
                Some(Script::Fail(message)) => {
                    Err(GatewayError::RequestFailed(message.to_string()))
                }
                Some(Script::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(GatewayError::Timeout)
                }
                None => Err(GatewayError::Other(format!(
                    "unscripted call to {}",
                    request.model
                ))),
            }
        }
    }

    fn council() -> Vec<Model> {
        vec![Model::Gpt51, Model::ClaudeSonnet45, Model::Grok4]
    }

    fn input(council: Vec<Model>) -> RunCouncilInput {
        RunCouncilInput {
            query: Query::new("What is the capital of France?"),
            council,
            chairman: Model::Gemini3Pro,
            persist_to: None,
        }
    }

    fn event_types(events: &[DeliberationEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.event_type()).collect()
    }

    #[tokio::test]
    async fn test_happy_path_full_event_sequence() {
        let gateway = ScriptedGateway::new(vec![
            (
                "openai/gpt-5.1",
                vec![
                    Script::Reply("Paris, of course."),
                    Script::Reply("FINAL RANKING:\n1. Response B\n2. Response C"),
                ],
            ),
            (
                "anthropic/claude-sonnet-4.5",
                vec![
                    Script::Reply("The capital is Paris."),
                    Script::Reply("FINAL RANKING:\n1. Response A\n2. Response C"),
                ],
            ),
            (
                "x-ai/grok-4",
                vec![
                    Script::Reply("Paris."),
                    Script::Reply("FINAL RANKING:\n1. Response A\n2. Response B"),
                ],
            ),
            ("google/gemini-3-pro-preview", vec![Script::Reply("Paris is the capital of France.")]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();

        let result = use_case
            .execute_with_sink(input(council()), &emitter, CancellationToken::new())
            .await
            .unwrap();
        drop(emitter);

        assert_eq!(result.stage_one.len(), 3);
        assert_eq!(result.stage_one.success_count(), 3);
        assert_eq!(result.evaluations.len(), 3);
        assert!(result.evaluations.iter().all(|e| e.ranking.len() == 2));
        assert_eq!(result.synthesis.chairman, Model::Gemini3Pro);
        assert_eq!(result.synthesis.content, "Paris is the capital of France.");

        // Response A (gpt) was ranked first by both peers
        let leader = result.metadata.aggregate.leader().unwrap();
        assert_eq!(leader.label, Label::new("Response A"));
        assert_eq!(leader.average_position, 1.0);
        assert_eq!(leader.mentions, 2);
        assert_eq!(
            result.metadata.anonymization.model_for(&leader.label),
            Some(&Model::Gpt51)
        );

        let events = stream.collect_all().await;
        assert_eq!(
            event_types(&events),
            vec![
                "stage1_start",
                "stage1_complete",
                "stage2_start",
                "stage2_complete",
                "stage3_start",
                "stage3_complete",
                "complete",
            ]
        );

        // the event stream alone rebuilds the completed run
        let transcript = Transcript::replay(&events);
        assert_eq!(transcript.status(), DeliberationStatus::Complete);
        assert_eq!(
            transcript.synthesis().map(|s| s.content.as_str()),
            Some("Paris is the capital of France.")
        );
    }

    #[tokio::test]
    async fn test_evaluator_never_sees_own_label() {
        let gateway = ScriptedGateway::new(vec![
            (
                "openai/gpt-5.1",
                vec![
                    Script::Reply("answer one"),
                    // tries to rank itself first; its own label is unknown to the parser
                    Script::Reply("FINAL RANKING:\n1. Response A\n2. Response B"),
                ],
            ),
            (
                "anthropic/claude-sonnet-4.5",
                vec![
                    Script::Reply("answer two"),
                    Script::Reply("FINAL RANKING:\n1. Response A"),
                ],
            ),
            ("google/gemini-3-pro-preview", vec![Script::Reply("final")]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());

        let result = use_case
            .execute(input(vec![Model::Gpt51, Model::ClaudeSonnet45]))
            .await
            .unwrap();

        // gpt is Response A; its self-vote is dropped, leaving only B
        let gpt_eval = &result.evaluations[0];
        assert_eq!(gpt_eval.evaluator, Model::Gpt51);
        assert_eq!(gpt_eval.ranking, vec![Label::new("Response B")]);
    }

    #[tokio::test]
    async fn test_total_stage_one_failure() {
        let gateway = ScriptedGateway::new(vec![
            ("openai/gpt-5.1", vec![Script::Fail("down")]),
            ("anthropic/claude-sonnet-4.5", vec![Script::Fail("down")]),
            ("x-ai/grok-4", vec![Script::Fail("down")]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();

        let error = use_case
            .execute_with_sink(input(council()), &emitter, CancellationToken::new())
            .await
            .unwrap_err();
        drop(emitter);

        assert!(matches!(error, RunCouncilError::AllModelsFailed));

        let events = stream.collect_all().await;
        assert_eq!(event_types(&events), vec!["stage1_start", "error"]);
        assert_eq!(
            Transcript::replay(&events).status(),
            DeliberationStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure_and_run_completes() {
        let gateway = ScriptedGateway::new(vec![
            (
                "openai/gpt-5.1",
                vec![
                    Script::Reply("answer one"),
                    Script::Reply("FINAL RANKING:\n1. Response B"),
                ],
            ),
            ("anthropic/claude-sonnet-4.5", vec![Script::Hang]),
            (
                "x-ai/grok-4",
                vec![
                    Script::Reply("answer three"),
                    Script::Reply("FINAL RANKING:\n1. Response A"),
                ],
            ),
            ("google/gemini-3-pro-preview", vec![Script::Reply("final answer")]),
        ]);
        let use_case = RunCouncilUseCase::new(
            gateway,
            CallOptions {
                timeout: Some(Duration::from_millis(50)),
            },
        );
        let (emitter, stream) = ChannelEmitter::new();

        let result = use_case
            .execute_with_sink(input(council()), &emitter, CancellationToken::new())
            .await
            .unwrap();
        drop(emitter);

        assert_eq!(result.stage_one.len(), 3);
        assert_eq!(result.stage_one.success_count(), 2);
        let timed_out = result.stage_one.get(&Model::ClaudeSonnet45).unwrap();
        assert_eq!(timed_out.error.as_deref(), Some("request timed out"));

        // only the two successes were anonymized and evaluated
        assert_eq!(result.metadata.anonymization.len(), 2);
        assert_eq!(result.evaluations.len(), 2);
        assert_eq!(result.synthesis.content, "final answer");

        let events = stream.collect_all().await;
        assert_eq!(events.last(), Some(&DeliberationEvent::Complete));
    }

    #[tokio::test]
    async fn test_cancellation_mid_stage_one() {
        let gateway = ScriptedGateway::new(vec![
            ("openai/gpt-5.1", vec![Script::Hang]),
            ("anthropic/claude-sonnet-4.5", vec![Script::Hang]),
            ("x-ai/grok-4", vec![Script::Hang]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();
        let cancel = CancellationToken::new();

        let run = use_case.execute_with_sink(input(council()), &emitter, cancel.clone());
        let cancel_soon = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        };
        let (outcome, _) = tokio::join!(run, cancel_soon);
        drop(emitter);

        assert!(matches!(outcome.unwrap_err(), RunCouncilError::Cancelled));

        let events = stream.collect_all().await;
        assert_eq!(events.last(), Some(&DeliberationEvent::Cancelled));
        assert_eq!(
            Transcript::replay(&events).status(),
            DeliberationStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_single_success_skips_ranking_but_still_completes() {
        let gateway = ScriptedGateway::new(vec![
            ("openai/gpt-5.1", vec![Script::Reply("the only answer")]),
            ("anthropic/claude-sonnet-4.5", vec![Script::Fail("down")]),
            ("google/gemini-3-pro-preview", vec![Script::Reply("final")]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();

        let result = use_case
            .execute_with_sink(
                input(vec![Model::Gpt51, Model::ClaudeSonnet45]),
                &emitter,
                CancellationToken::new(),
            )
            .await
            .unwrap();
        drop(emitter);

        assert!(result.evaluations.is_empty());
        assert!(result.metadata.aggregate.is_empty());
        assert_eq!(result.synthesis.content, "final");

        // Stage 2 events still fire, with empty payloads
        let events = stream.collect_all().await;
        assert_eq!(
            event_types(&events),
            vec![
                "stage1_start",
                "stage1_complete",
                "stage2_start",
                "stage2_complete",
                "stage3_start",
                "stage3_complete",
                "complete",
            ]
        );
    }

    #[tokio::test]
    async fn test_chairman_failure_after_valid_stages() {
        let gateway = ScriptedGateway::new(vec![
            (
                "openai/gpt-5.1",
                vec![
                    Script::Reply("answer one"),
                    Script::Reply("FINAL RANKING:\n1. Response B"),
                ],
            ),
            (
                "anthropic/claude-sonnet-4.5",
                vec![
                    Script::Reply("answer two"),
                    Script::Reply("FINAL RANKING:\n1. Response A"),
                ],
            ),
            ("google/gemini-3-pro-preview", vec![Script::Fail("chairman offline")]),
        ]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();

        let error = use_case
            .execute_with_sink(
                input(vec![Model::Gpt51, Model::ClaudeSonnet45]),
                &emitter,
                CancellationToken::new(),
            )
            .await
            .unwrap_err();
        drop(emitter);

        match error {
            RunCouncilError::SynthesisFailed(message) => {
                assert!(message.contains("chairman offline"))
            }
            other => panic!("expected SynthesisFailed, got {other:?}"),
        }

        // Stage 1/2 events were already delivered before the error
        let events = stream.collect_all().await;
        assert_eq!(
            event_types(&events),
            vec![
                "stage1_start",
                "stage1_complete",
                "stage2_start",
                "stage2_complete",
                "stage3_start",
                "error",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_council_rejected_before_any_call() {
        let gateway = ScriptedGateway::new(vec![]);
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default());
        let (emitter, stream) = ChannelEmitter::new();

        let error = use_case
            .execute_with_sink(input(vec![]), &emitter, CancellationToken::new())
            .await
            .unwrap_err();
        drop(emitter);

        assert!(matches!(error, RunCouncilError::EmptyCouncil));
        let events = stream.collect_all().await;
        assert_eq!(event_types(&events), vec!["error"]);
    }

    struct RecordingStore {
        records: Mutex<Vec<(RecordKey, CouncilRecord)>>,
    }

    impl ConversationStore for RecordingStore {
        fn append(&self, key: &RecordKey, record: &CouncilRecord) {
            self.records
                .lock()
                .unwrap()
                .push((key.clone(), record.clone()));
        }
    }

    #[tokio::test]
    async fn test_record_persisted_when_requested() {
        let gateway = ScriptedGateway::new(vec![
            (
                "openai/gpt-5.1",
                vec![
                    Script::Reply("answer one"),
                    Script::Reply("FINAL RANKING:\n1. Response B"),
                ],
            ),
            (
                "anthropic/claude-sonnet-4.5",
                vec![
                    Script::Reply("answer two"),
                    Script::Reply("FINAL RANKING:\n1. Response A"),
                ],
            ),
            ("google/gemini-3-pro-preview", vec![Script::Reply("final")]),
        ]);
        let store = Arc::new(RecordingStore {
            records: Mutex::new(Vec::new()),
        });
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default())
            .with_store(Arc::clone(&store) as Arc<dyn ConversationStore>);

        use_case
            .execute(
                input(vec![Model::Gpt51, Model::ClaudeSonnet45])
                    .persisted_at(RecordKey::new("conv-42", 3)),
            )
            .await
            .unwrap();

        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        let (key, record) = &records[0];
        assert_eq!(key, &RecordKey::new("conv-42", 3));
        assert_eq!(record.role, "assistant");
        assert_eq!(record.stage1.len(), 2);
        assert_eq!(record.stage2.len(), 2);
        assert_eq!(record.stage3.response, "final");
    }

    #[tokio::test]
    async fn test_no_persistence_without_key() {
        let gateway = ScriptedGateway::new(vec![
            ("openai/gpt-5.1", vec![Script::Reply("only answer")]),
            ("google/gemini-3-pro-preview", vec![Script::Reply("final")]),
        ]);
        let store = Arc::new(RecordingStore {
            records: Mutex::new(Vec::new()),
        });
        let use_case = RunCouncilUseCase::new(gateway, CallOptions::default())
            .with_store(Arc::clone(&store) as Arc<dyn ConversationStore>);

        use_case.execute(input(vec![Model::Gpt51])).await.unwrap();
        assert!(store.records.lock().unwrap().is_empty());
    }
}

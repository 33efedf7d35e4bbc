//! Prompt template port
//!
//! The orchestrator treats stage prompts as opaque strings to fill and
//! send; it owns no prompt authoring. A collaborator can swap in its own
//! templates by implementing [`PromptSource`]. The default implementation
//! uses the built-in [`PromptTemplate`] texts.

use council_domain::{LabeledResponse, PromptTemplate};

/// Supplies the prompt text for every model-facing call
///
/// Implementations must keep Stage-2 and Stage-3 prompts label-only:
/// model identities never appear in text sent back to a model. The
/// Stage-2 prompt must also instruct the documented `FINAL RANKING:`
/// format, or rankings degrade to the fallback parse.
pub trait PromptSource: Send + Sync {
    fn stage_one_system(&self) -> String;
    fn stage_one_prompt(&self, query: &str) -> String;

    fn ranking_system(&self) -> String;
    fn ranking_prompt(&self, query: &str, responses: &[LabeledResponse]) -> String;

    fn synthesis_system(&self) -> String;
    fn synthesis_prompt(
        &self,
        query: &str,
        responses: &[LabeledResponse],
        evaluations: &[String],
    ) -> String;

    fn thread_system(&self) -> String;
    fn thread_prompt(&self, context: &str, instruction: &str) -> String;
}

/// The built-in prompt texts
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompts;

impl PromptSource for DefaultPrompts {
    fn stage_one_system(&self) -> String {
        PromptTemplate::stage_one_system().to_string()
    }

    fn stage_one_prompt(&self, query: &str) -> String {
        PromptTemplate::stage_one_query(query)
    }

    fn ranking_system(&self) -> String {
        PromptTemplate::ranking_system().to_string()
    }

    fn ranking_prompt(&self, query: &str, responses: &[LabeledResponse]) -> String {
        PromptTemplate::ranking_prompt(query, responses)
    }

    fn synthesis_system(&self) -> String {
        PromptTemplate::synthesis_system().to_string()
    }

    fn synthesis_prompt(
        &self,
        query: &str,
        responses: &[LabeledResponse],
        evaluations: &[String],
    ) -> String {
        PromptTemplate::synthesis_prompt(query, responses, evaluations)
    }

    fn thread_system(&self) -> String {
        PromptTemplate::thread_system().to_string()
    }

    fn thread_prompt(&self, context: &str, instruction: &str) -> String {
        PromptTemplate::thread_prompt(context, instruction)
    }
}

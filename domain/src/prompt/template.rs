//! Prompt templates for the council flow
//!
//! Stage-2 and Stage-3 prompts are built from anonymized labels only.
//! Model identities must never reach another model, so nothing here
//! accepts a [`crate::core::model::Model`].

use crate::deliberation::LabeledResponse;
use crate::ranking::RANKING_MARKER;

/// The default prompt texts, one constructor per stage.
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the Stage-1 answer
    pub fn stage_one_system() -> &'static str {
        r#"You are a knowledgeable expert asked for your independent answer to a question.
Provide a thoughtful, well-reasoned response. Be concise but comprehensive.
Support your points with reasoning and examples where appropriate.
Focus on accuracy and clarity."#
    }

    /// User prompt for the Stage-1 answer
    pub fn stage_one_query(question: &str) -> String {
        question.to_string()
    }

    /// System prompt for the Stage-2 peer ranking
    pub fn ranking_system() -> &'static str {
        r#"You are a critical evaluator comparing anonymous responses to the same question.
Assess each response for accuracy, completeness, clarity, and practical usefulness.
Be fair and objective. You do not know which assistant wrote which response."#
    }

    /// User prompt for the Stage-2 peer ranking
    ///
    /// Ends with the exact instruction the ranking parser relies on: a
    /// `FINAL RANKING:` header followed by a numbered list of labels.
    pub fn ranking_prompt(question: &str, responses: &[LabeledResponse]) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Below are anonymous responses to this question from other assistants.
Evaluate each one for:
1. Accuracy and correctness
2. Completeness
3. Clarity and organization
4. Practical usefulness

Responses to evaluate:
"#,
            question
        );

        for response in responses {
            prompt.push_str(&format!(
                "\n--- {} ---\n{}\n",
                response.label, response.content
            ));
        }

        prompt.push_str(&format!(
            r#"
First discuss the strengths and weaknesses of each response.

Then end your reply with the literal header `{marker}:` followed by a
numbered list of ALL response labels, best first, one per line:

{marker}:
1. [label of best response]
2. [label of second-best response]
...

Use the exact labels shown above (for example "Response A"). Do not
add anything after the list."#,
            marker = RANKING_MARKER
        ));

        prompt
    }

    /// System prompt for the Stage-3 synthesis
    pub fn synthesis_system() -> &'static str {
        r#"You are the chairman of a council of AI assistants.
Several assistants have answered the same question and ranked each other's answers.
Your task is to synthesize their work into one final answer:
1. Identify areas of consensus
2. Weigh disagreements and judge which positions are better supported
3. Combine the strongest elements into a single comprehensive response

Be balanced and objective. Give weight to well-reasoned arguments regardless of source."#
    }

    /// User prompt for the Stage-3 synthesis
    ///
    /// Evaluations are presented without attribution; the chairman sees
    /// labels, never model identities.
    pub fn synthesis_prompt(
        question: &str,
        responses: &[LabeledResponse],
        evaluations: &[String],
    ) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Council responses:
"#,
            question
        );

        for response in responses {
            prompt.push_str(&format!(
                "\n--- {} ---\n{}\n",
                response.label, response.content
            ));
        }

        if !evaluations.is_empty() {
            prompt.push_str("\nPeer evaluations:\n");
            for (i, evaluation) in evaluations.iter().enumerate() {
                prompt.push_str(&format!("\n--- Evaluation {} ---\n{}\n", i + 1, evaluation));
            }
        }

        prompt.push_str(
            r#"
Based on all responses and evaluations above, write the single best
final answer to the original question. Incorporate the strongest
elements from the council's work, resolve disagreements explicitly,
and do not mention the responses, evaluations, or this process."#,
        );

        prompt
    }

    /// System prompt for a single-model follow-up thread
    pub fn thread_system() -> &'static str {
        r#"You are continuing a conversation about material the user has selected.
Ground your reply in the provided context. If the context does not
contain enough information to answer, say so rather than inventing
details."#
    }

    /// User prompt for a single-model follow-up thread
    pub fn thread_prompt(context: &str, instruction: &str) -> String {
        format!(
            r#"Context:

{}

---

{}"#,
            context, instruction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::Label;

    fn labeled() -> Vec<LabeledResponse> {
        vec![
            LabeledResponse {
                label: Label::new("Response A"),
                content: "Rust is a systems programming language.".to_string(),
            },
            LabeledResponse {
                label: Label::new("Response B"),
                content: "Rust focuses on safety and performance.".to_string(),
            },
        ]
    }

    #[test]
    fn test_stage_one_query_is_verbatim() {
        assert_eq!(PromptTemplate::stage_one_query("What is Rust?"), "What is Rust?");
    }

    #[test]
    fn test_ranking_prompt_embeds_marker_and_labels() {
        let prompt = PromptTemplate::ranking_prompt("What is Rust?", &labeled());
        assert!(prompt.contains("What is Rust?"));
        assert!(prompt.contains("--- Response A ---"));
        assert!(prompt.contains("--- Response B ---"));
        assert!(prompt.contains("FINAL RANKING:"));
    }

    #[test]
    fn test_ranking_prompt_round_trips_through_parser() {
        // a compliant model echoes the requested format back
        let reply = format!(
            "Both are solid.\n\n{}:\n1. Response B\n2. Response A\n",
            RANKING_MARKER
        );
        let known = vec![Label::new("Response A"), Label::new("Response B")];
        let ranking = crate::ranking::parse_ranking(&reply, &known);
        assert_eq!(
            ranking,
            vec![Label::new("Response B"), Label::new("Response A")]
        );
    }

    #[test]
    fn test_synthesis_prompt_contains_sections() {
        let evaluations = vec!["Response A is stronger.".to_string()];
        let prompt = PromptTemplate::synthesis_prompt("What is Rust?", &labeled(), &evaluations);
        assert!(prompt.contains("Council responses:"));
        assert!(prompt.contains("--- Response A ---"));
        assert!(prompt.contains("Peer evaluations:"));
        assert!(prompt.contains("--- Evaluation 1 ---"));
    }

    #[test]
    fn test_synthesis_without_evaluations() {
        let prompt = PromptTemplate::synthesis_prompt("What is Rust?", &labeled(), &[]);
        assert!(!prompt.contains("Peer evaluations:"));
    }

    #[test]
    fn test_thread_prompt_contains_context_and_instruction() {
        let prompt = PromptTemplate::thread_prompt("pinned text", "explain further");
        assert!(prompt.contains("pinned text"));
        assert!(prompt.contains("explain further"));
    }
}

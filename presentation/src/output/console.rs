//! Colored terminal rendering of a finished deliberation.

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::DeliberationResult;

pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The full report: all three stages, per-model errors, leaderboard.
    pub fn format(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            result.query
        ));

        // Council roster
        output.push_str(&format!(
            "{} {}\n\n",
            "Council:".cyan().bold(),
            Self::model_list(result)
        ));

        // Stage 1: Independent Answers
        output.push_str(&Self::section_header("Stage 1: Independent Answers"));
        for response in result.stage_one.responses() {
            if response.is_success() {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", response.model).yellow().bold(),
                    response.content.as_deref().unwrap_or("")
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", response.model).red().bold(),
                    response.error.as_deref().unwrap_or("Cancelled")
                ));
            }
        }

        // Stage 2: Peer Rankings (if any)
        if !result.evaluations.is_empty() {
            output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
            for evaluation in &result.evaluations {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", evaluation.evaluator).yellow().bold(),
                    evaluation.text
                ));
            }

            // De-anonymized leaderboard
            if !result.metadata.aggregate.is_empty() {
                output.push_str(&format!("\n{}\n", "Aggregate ranking:".cyan().bold()));
                for (position, score) in result.metadata.aggregate.scores().iter().enumerate() {
                    let model = result
                        .metadata
                        .anonymization
                        .model_for(&score.label)
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| score.label.to_string());
                    output.push_str(&format!(
                        "  {}. {} ({}, avg position {:.2}, {} mentions)\n",
                        position + 1,
                        model,
                        score.label,
                        score.average_position,
                        score.mentions
                    ));
                }
            }
        }

        // Stage 3: Synthesis
        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Chairman: {}", result.synthesis.chairman)
                .yellow()
                .bold(),
            result.synthesis.content
        ));

        output.push_str(&Self::footer());

        output
    }

    pub fn format_json(result: &DeliberationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// The short default view: question, roster, chairman's answer.
    pub fn format_synthesis_only(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.query));

        output.push_str(&format!(
            "{} {}\n\n",
            "Council consulted:".dimmed(),
            Self::model_list(result)
        ));

        output.push_str(&result.synthesis.content);
        output.push('\n');

        output
    }

    fn model_list(result: &DeliberationResult) -> String {
        result
            .council
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DeliberationResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DeliberationResult) -> String {
        Self::format_json(result)
    }

    fn format_synthesis_only(&self, result: &DeliberationResult) -> String {
        Self::format_synthesis_only(result)
    }
}

//! clap surface of the `llm-council` binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How much of the deliberation to print.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Every stage: answers, rankings, leaderboard, synthesis
    Full,
    /// Just the chairman's synthesis
    Synthesis,
    /// The whole result as JSON
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Synthesis => council_domain::OutputFormat::Synthesis,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - models answer, rank each other, and a chairman synthesizes")]
#[command(long_about = r#"
llm-council sends one question to a council of LLMs over OpenRouter.

The deliberation runs in three stages:
1. every council model answers the question in parallel
2. each model ranks the others' anonymized answers
3. a chairman model writes the final answer from all of the above

Config is merged from lowest to highest precedence: built-in defaults,
~/.config/llm-council/config.toml, ./council.toml, then --config <path>.

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m openai/gpt-5.1 -m x-ai/grok-4 "Compare async runtimes"
  llm-council --chairman anthropic/claude-opus-4.5 --format full "Review this design"
"#)]
pub struct Cli {
    /// What to ask the council
    pub question: Option<String>,

    /// Add a model to the council (repeatable)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model that writes the final synthesis
    #[arg(long, value_name = "MODEL")]
    pub chairman: Option<String>,

    /// Output format (falls back to the config file's choice, then synthesis)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// No spinners, no per-model progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Extra config file, merged over global and project config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore all configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Print which config files would be read, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Append the council record to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

//! Presentation layer for llm-council
//!
//! Everything the user sees in a terminal: the clap argument surface,
//! live deliberation progress, and result formatting.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

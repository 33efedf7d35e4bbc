//! Configuration value objects shared across layers.

pub mod output_format;
pub mod validation;

pub use output_format::OutputFormat;
pub use validation::{has_errors, validate_council, ConfigIssue, ConfigIssueCode, Severity};

//! Council roster validation.
//!
//! Detects roster shapes that cannot deliberate or will behave in a
//! degraded way, and returns structured issues with severity levels so
//! callers can decide what to refuse and what to merely report.

use crate::core::model::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The roster cannot deliberate at all.
    Error,
    /// The roster works, but a stage will degrade.
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No models configured: nothing to deliberate.
    EmptyCouncil,
    /// A single model gets no peers, so Stage 2 produces no evaluations.
    SingleModelCouncil,
    /// The same model appears twice; it will answer and be ranked twice.
    DuplicateModel,
    /// A model with a blank identifier, usually a typo in a config file.
    EmptyModelName,
}

/// A detected issue in the council configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Validate a council roster.
///
/// The chairman is deliberately unconstrained: it may be a council
/// member or an outside model, both are legal.
pub fn validate_council(models: &[Model]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if models.is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyCouncil,
            "No models configured for the council",
        ));
        return issues;
    }

    if models.len() == 1 {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::SingleModelCouncil,
            format!(
                "Council has a single model ({}); peer ranking will be skipped",
                models[0]
            ),
        ));
    }

    for model in models {
        if model.as_str().trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                "Council contains a model with an empty name",
            ));
        }
    }

    let mut seen: Vec<&Model> = Vec::new();
    for model in models {
        if seen.contains(&model) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::DuplicateModel,
                format!("Model {} appears more than once in the council", model),
            ));
        } else {
            seen.push(model);
        }
    }

    issues
}

/// True when at least one issue is severe enough to refuse the run.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

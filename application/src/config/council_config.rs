//! Council composition container.
//!
//! [`CouncilConfig`] holds the roster and chairman a deliberation runs
//! with. Use cases receive the concrete pieces they need through
//! [`crate::use_cases::run_council::RunCouncilInput`]; this container is
//! what the configuration layer produces and the entrypoint holds.

use council_domain::config::validation::{self, ConfigIssue};
use council_domain::Model;

/// Which models deliberate and which one synthesizes.
#[derive(Debug, Clone, PartialEq)]
pub struct CouncilConfig {
    models: Vec<Model>,
    chairman: Model,
}

impl CouncilConfig {
    pub fn new(models: Vec<Model>, chairman: Model) -> Self {
        Self { models, chairman }
    }

    /// Council members, in the order they were configured.
    ///
    /// Roster order is load-bearing: stage results and anonymization
    /// labels follow it.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// The model that writes the Stage-3 synthesis. May or may not be a
    /// council member.
    pub fn chairman(&self) -> &Model {
        &self.chairman
    }

    pub fn with_models(mut self, models: Vec<Model>) -> Self {
        self.models = models;
        self
    }

    pub fn with_chairman(mut self, chairman: Model) -> Self {
        self.chairman = chairman;
        self
    }

    /// Validate the roster.
    ///
    /// Delegates to [`validation::validate_council`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        validation::validate_council(&self.models)
    }
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            models: Model::default_council(),
            chairman: Model::default_chairman(),
        }
    }
}

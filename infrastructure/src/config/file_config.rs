//! Serde mirror of the TOML config file.
//!
//! Model names stay raw strings here; parsing into domain types happens
//! through the accessor methods so unknown models degrade gracefully.

use council_application::config::CouncilConfig;
use council_domain::{validate_council, ConfigIssue, Model, OutputFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[council]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Council roster, OpenRouter identifiers
    pub models: Vec<String>,
    /// Model that writes the synthesis
    pub chairman: Option<String>,
}

impl FileCouncilConfig {
    pub fn parse_models(&self) -> Vec<Model> {
        self.models.iter().map(|name| Model::from_id(name)).collect()
    }

    pub fn parse_chairman(&self) -> Option<Model> {
        self.chairman.as_deref().map(Model::from_id)
    }
}

/// `[gateway]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Per-call timeout in seconds; 0 or absent means no bound
    pub timeout_secs: Option<u64>,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout_secs: Some(120),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
        }
    }
}

impl FileGatewayConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default format when the CLI passes no `--format`
    pub format: Option<OutputFormat>,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Append council records to this JSONL file
    pub conversations_file: Option<String>,
}

/// The whole config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub council: FileCouncilConfig,
    pub gateway: FileGatewayConfig,
    pub output: FileOutputConfig,
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    ///
    /// An absent `[council]` section is clean: the defaults apply.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.council.models.is_empty() {
            return Vec::new();
        }
        validate_council(&self.council.parse_models())
    }

    /// Build the application-level council configuration,
    /// falling back to defaults for anything not set.
    pub fn council_config(&self) -> CouncilConfig {
        let mut config = CouncilConfig::default();
        if !self.council.models.is_empty() {
            config = config.with_models(self.council.parse_models());
        }
        if let Some(chairman) = self.council.parse_chairman() {
            config = config.with_chairman(chairman);
        }
        config
    }
}

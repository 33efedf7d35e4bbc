//! Model value object representing an LLM backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One model backend a council seat can be assigned to.
///
/// Identifiers use the provider-prefixed form routed by the gateway
/// (e.g. `openai/gpt-5.1`). Unknown identifiers become [`Model::Custom`],
/// so the council roster is never limited to the well-known set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI
    Gpt51,
    Gpt5,
    Gpt4o,
    // Anthropic
    ClaudeSonnet45,
    ClaudeOpus45,
    ClaudeHaiku45,
    // Google
    Gemini3Pro,
    Gemini25Pro,
    // xAI
    Grok4,
    /// Anything else, carried verbatim
    Custom(String),
}

impl Model {
    /// Resolve a string identifier to a model
    ///
    /// Never fails: identifiers outside the well-known set become
    /// [`Model::Custom`].
    pub fn from_id(s: &str) -> Model {
        match s {
            "openai/gpt-5.1" => Model::Gpt51,
            "openai/gpt-5" => Model::Gpt5,
            "openai/gpt-4o" => Model::Gpt4o,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "anthropic/claude-opus-4.5" => Model::ClaudeOpus45,
            "anthropic/claude-haiku-4.5" => Model::ClaudeHaiku45,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "google/gemini-2.5-pro" => Model::Gemini25Pro,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        }
    }

    /// The wire identifier, as sent to the gateway.
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gpt5 => "openai/gpt-5",
            Model::Gpt4o => "openai/gpt-4o",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::ClaudeOpus45 => "anthropic/claude-opus-4.5",
            Model::ClaudeHaiku45 => "anthropic/claude-haiku-4.5",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::Gemini25Pro => "google/gemini-2.5-pro",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// The bare model name without the provider prefix
    pub fn short_name(&self) -> &str {
        self.as_str()
            .split_once('/')
            .map_or(self.as_str(), |(_, n)| n)
    }

    /// Default council roster for a deliberation
    pub fn default_council() -> Vec<Model> {
        vec![
            Model::Gpt51,
            Model::Gemini3Pro,
            Model::ClaudeSonnet45,
            Model::Grok4,
        ]
    }

    /// Default chairman model for synthesis
    pub fn default_chairman() -> Model {
        Model::Gemini3Pro
    }
}

/// The lead seat of [`Model::default_council`]
impl Default for Model {
    fn default() -> Self {
        Model::Gpt51
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_id(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_id(&s))
    }
}

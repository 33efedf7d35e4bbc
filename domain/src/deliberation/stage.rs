//! Deliberation stages and orchestrator states

use serde::{Deserialize, Serialize};

/// Stage of a council deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Stage 1 - every council model answers the query independently
    Collect,
    /// Stage 2 - models rank each other's anonymized answers
    Rank,
    /// Stage 3 - the chairman synthesizes a final answer
    Synthesize,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Collect => "collect",
            Stage::Rank => "rank",
            Stage::Synthesize => "synthesize",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Collect => "Stage 1: Independent Answers",
            Stage::Rank => "Stage 2: Peer Ranking",
            Stage::Synthesize => "Stage 3: Chairman Synthesis",
        }
    }

    /// 1-based stage number
    pub fn number(&self) -> usize {
        match self {
            Stage::Collect => 1,
            Stage::Rank => 2,
            Stage::Synthesize => 3,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// State of a single deliberation run
///
/// Transitions are strictly one-directional:
///
/// ```text
/// Idle -> Stage1Running -> Stage1Done -> Stage2Running -> Stage2Done
///      -> Stage3Running -> Complete
/// ```
///
/// with two terminal side exits: `Failed` (zero Stage-1 successes, or a
/// chairman error) and `Cancelled` (caller cancellation). There is no
/// stage replay within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliberationStatus {
    Idle,
    Stage1Running,
    Stage1Done,
    Stage2Running,
    Stage2Done,
    Stage3Running,
    Complete,
    Failed,
    Cancelled,
}

impl DeliberationStatus {
    /// Whether the deliberation has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliberationStatus::Complete
                | DeliberationStatus::Failed
                | DeliberationStatus::Cancelled
        )
    }

    /// The stage currently running, if any
    pub fn running_stage(&self) -> Option<Stage> {
        match self {
            DeliberationStatus::Stage1Running => Some(Stage::Collect),
            DeliberationStatus::Stage2Running => Some(Stage::Rank),
            DeliberationStatus::Stage3Running => Some(Stage::Synthesize),
            _ => None,
        }
    }
}

impl Default for DeliberationStatus {
    fn default() -> Self {
        DeliberationStatus::Idle
    }
}

//! Rendering contract for finished deliberations.

use council_domain::DeliberationResult;

pub trait OutputFormatter {
    /// Every stage, rankings and leaderboard included.
    fn format(&self, result: &DeliberationResult) -> String;

    /// The whole result as pretty-printed JSON.
    fn format_json(&self, result: &DeliberationResult) -> String;

    /// Just the chairman's answer.
    fn format_synthesis_only(&self, result: &DeliberationResult) -> String;
}

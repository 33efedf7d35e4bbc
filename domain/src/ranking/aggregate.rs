//! Ranking aggregation across evaluators

use serde::{Deserialize, Serialize};

use crate::deliberation::{Label, RankedEvaluation};

/// One label's aggregate standing across all evaluations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    pub label: Label,
    /// Mean 1-based list position, unrounded
    pub average_position: f64,
    /// Number of evaluations that ranked this label at all
    pub mentions: usize,
}

/// Labels ordered best-first by average position (Value Object)
///
/// Labels no evaluator mentioned do not appear. Ties keep the order in
/// which the labels were first seen across the evaluations, so the same
/// input always produces the same output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateRanking {
    scores: Vec<RankedScore>,
}

impl AggregateRanking {
    pub fn scores(&self) -> &[RankedScore] {
        &self.scores
    }

    /// The best-placed label, if any evaluation produced a ranking
    pub fn leader(&self) -> Option<&RankedScore> {
        self.scores.first()
    }

    pub fn get(&self, label: &Label) -> Option<&RankedScore> {
        self.scores.iter().find(|s| &s.label == label)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Combine parsed rankings into an aggregate standing
///
/// Each label accumulates the 1-based positions it got; the average is
/// plain `sum / count` in `f64`. Sorting ascending by that average is
/// stable, so equal averages fall back to first-seen order.
pub fn aggregate(evaluations: &[RankedEvaluation]) -> AggregateRanking {
    let mut tally: Vec<(Label, usize, usize)> = Vec::new();

    for evaluation in evaluations {
        for (position, label) in evaluation.ranking.iter().enumerate() {
            match tally.iter_mut().find(|(l, _, _)| l == label) {
                Some((_, sum, count)) => {
                    *sum += position + 1;
                    *count += 1;
                }
                None => tally.push((label.clone(), position + 1, 1)),
            }
        }
    }

    let mut scores: Vec<RankedScore> = tally
        .into_iter()
        .map(|(label, sum, count)| RankedScore {
            label,
            average_position: sum as f64 / count as f64,
            mentions: count,
        })
        .collect();
    scores.sort_by(|a, b| a.average_position.total_cmp(&b.average_position));

    AggregateRanking { scores }
}

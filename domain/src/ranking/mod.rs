//! Peer-ranking extraction and aggregation.

pub mod aggregate;
pub mod parsing;

pub use aggregate::{aggregate, AggregateRanking, RankedScore};
pub use parsing::{parse_ranking, RANKING_MARKER};

//! Consensus selection: rank scored responses and decide whether the top two
//! are close enough to be merged.

use crate::core::adapter::AdapterId;

/// Default score gap under which the top two responses are merged
pub const DEFAULT_NEAR_TIE_THRESHOLD: f64 = 0.1;

/// A response score in ranking order
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    pub adapter: AdapterId,
    pub score: f64,
}

/// Outcome of selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Use the primary response as-is
    Best { primary: AdapterId, score: f64 },
    /// Reconcile the two near-tied responses into one text
    Merge {
        primary: AdapterId,
        secondary: AdapterId,
        score: f64,
    },
}

impl Selection {
    pub fn primary(&self) -> &AdapterId {
        match self {
            Selection::Best { primary, .. } | Selection::Merge { primary, .. } => primary,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Selection::Best { score, .. } | Selection::Merge { score, .. } => *score,
        }
    }
}

/// Rank scores descending.
///
/// `scores` must be given in adapter priority order; the sort is stable so
/// equal scores keep that order.
pub fn rank(scores: &[(AdapterId, f64)]) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = scores
        .iter()
        .map(|(adapter, score)| RankedScore {
            adapter: adapter.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Whether two scores are within the near-tie threshold
pub fn is_near_tie(first: f64, second: f64, threshold: f64) -> bool {
    (first - second).abs() < threshold
}

/// Select the winning response, or the pair to merge.
///
/// Returns `None` only for an empty ranking.
pub fn select(ranked: &[RankedScore], threshold: f64) -> Option<Selection> {
    let top = ranked.first()?;
    match ranked.get(1) {
        Some(runner_up) if is_near_tie(top.score, runner_up.score, threshold) => {
            Some(Selection::Merge {
                primary: top.adapter.clone(),
                secondary: runner_up.adapter.clone(),
                score: top.score,
            })
        }
        _ => Some(Selection::Best {
            primary: top.adapter.clone(),
            score: top.score,
        }),
    }
}

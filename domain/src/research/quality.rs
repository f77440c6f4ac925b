//! Quality score of a finished research run (0 to 100).

use crate::consensus::value_objects::ConsensusMethod;
use crate::research::article::Article;
use crate::research::entities::StepOutcome;

const COMPLETION_POINTS: f64 = 30.0;
const CONSENSUS_POINTS: f64 = 25.0;
const MAX_SCORE: f64 = 100.0;

/// Points for article length in characters
fn length_points(chars: usize) -> f64 {
    match chars {
        n if n > 5000 => 25.0,
        n if n > 2000 => 20.0,
        n if n > 1000 => 15.0,
        _ => 10.0,
    }
}

/// Points for the number of canonical sections the article contains
fn structure_points(sections: usize) -> f64 {
    match sections {
        n if n >= 5 => 20.0,
        n if n >= 3 => 15.0,
        _ => 5.0,
    }
}

/// Fraction of steps that completed without error (0 for an empty run)
pub fn completion_ratio(outcomes: &[StepOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let ok = outcomes.iter().filter(|o| o.is_success()).count();
    ok as f64 / outcomes.len() as f64
}

/// Mean consensus score over the successful steps that were scored.
///
/// Single-response steps carry no consensus score and are left out.
pub fn average_consensus(outcomes: &[StepOutcome]) -> f64 {
    let scores: Vec<f64> = outcomes
        .iter()
        .filter_map(|o| o.consensus())
        .filter(|c| c.method != ConsensusMethod::Single)
        .map(|c| c.score)
        .collect();
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Score a run:
/// 30 × completion ratio + length points (max 25) + 25 × mean consensus
/// score (capped at 25) + structure points (max 20), capped at 100.
pub fn quality_score(outcomes: &[StepOutcome], article: &Article) -> f64 {
    let completion = completion_ratio(outcomes) * COMPLETION_POINTS;
    let length = length_points(article.char_count());
    let consensus = (average_consensus(outcomes) * CONSENSUS_POINTS).clamp(0.0, CONSENSUS_POINTS);
    let structure = structure_points(article.structure.len());

    (completion + length + consensus + structure).min(MAX_SCORE)
}

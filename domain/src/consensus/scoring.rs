//! Response scoring
//!
//! Each surviving response gets one scalar score, a weighted sum of five
//! signals multiplied by the user's learned weight for the adapter:
//!
//! | signal            | default weight |
//! |-------------------|----------------|
//! | base suitability  | 0.20           |
//! | peer consensus    | 0.25           |
//! | length adequacy   | 0.15           |
//! | prompt relevance  | 0.25           |
//! | language quality  | 0.15           |

use crate::core::adapter::AdapterProfile;
use crate::core::error::DomainError;
use crate::core::language;
use crate::core::string::{char_count, char_terms, word_count, words};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod constants {
    pub const BASE_SCORE: f64 = 1.0;
    pub const STRENGTH_BONUS: f64 = 0.3;
    pub const MULTILINGUAL_BONUS: f64 = 0.2;
    pub const MAX_BASE_SCORE: f64 = 2.0;
    pub const LOGOGRAPHIC_TARGET_CHARS: f64 = 500.0;
    pub const TARGET_WORDS: f64 = 200.0;
    pub const MIN_QUALITY_CHARS: usize = 10;
    pub const SHORT_TEXT_QUALITY: f64 = 0.5;
    pub const SIGNIFICANT_TERM_LEN: usize = 3;
    pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
}

pub use constants::MAX_BASE_SCORE;

/// Prompt keywords that trigger a strength bonus when the adapter claims the strength
const STRENGTH_KEYWORDS: &[(&[&str], &str)] = &[
    (&["code", "program"], "coding"),
    (&["creative", "story"], "creativity"),
    (&["technical", "scientific"], "technical"),
    (&["analysis", "analyze"], "analysis"),
];

/// Weights of the five scoring signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub base: f64,
    pub consensus: f64,
    pub length: f64,
    pub relevance: f64,
    pub language_quality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 0.20,
            consensus: 0.25,
            length: 0.15,
            relevance: 0.25,
            language_quality: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.base + self.consensus + self.length + self.relevance + self.language_quality
    }

    /// Reject negative weights and weights that do not sum to 1.0
    pub fn validate(&self) -> Result<(), DomainError> {
        let all = [
            self.base,
            self.consensus,
            self.length,
            self.relevance,
            self.language_quality,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > constants::WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::InvalidWeights(format!(
                "weights sum to {:.4}, expected 1.0",
                sum
            )));
        }
        Ok(())
    }
}

/// Individual signal values of one scored response, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub consensus: f64,
    pub length: f64,
    pub relevance: f64,
    pub language_quality: f64,
}

impl ScoreBreakdown {
    /// Weighted sum multiplied by the user's weight for the adapter
    pub fn total(&self, weights: &ScoreWeights, user_weight: f64) -> f64 {
        let weighted = self.base * weights.base
            + self.consensus * weights.consensus
            + self.length * weights.length
            + self.relevance * weights.relevance
            + self.language_quality * weights.language_quality;
        (weighted * user_weight).max(0.0)
    }
}

/// Base suitability of an adapter for a prompt in a language, capped at 2.0.
///
/// Tier bonus + strength bonuses triggered by prompt keywords + multilingual bonus.
pub fn base_score(profile: &AdapterProfile, prompt: &str, language: &str) -> f64 {
    let mut score = constants::BASE_SCORE + profile.coverage.bonus_for(language);

    let lowered = prompt.to_lowercase();
    for (keywords, strength) in STRENGTH_KEYWORDS {
        if keywords.iter().any(|k| lowered.contains(k)) && profile.has_strength(strength) {
            score += constants::STRENGTH_BONUS;
        }
    }

    if profile.is_multilingual() {
        score += constants::MULTILINGUAL_BONUS;
    }

    score.min(constants::MAX_BASE_SCORE)
}

/// Length normalized against a language-appropriate target, capped at 1.0
pub fn length_score(content: &str, language: &str) -> f64 {
    let ratio = if language::is_logographic(language) {
        char_count(content) as f64 / constants::LOGOGRAPHIC_TARGET_CHARS
    } else {
        word_count(content) as f64 / constants::TARGET_WORDS
    };
    ratio.min(1.0)
}

/// Fraction of the prompt's terms that reappear in the response.
///
/// For word-based languages only words longer than three characters can
/// match, but every prompt word counts toward the denominator. Logographic
/// languages match per character.
pub fn relevance_score(content: &str, prompt: &str, language: &str) -> f64 {
    if language::is_logographic(language) {
        let prompt_chars = char_terms(prompt);
        if prompt_chars.is_empty() {
            return 0.0;
        }
        let response_chars: HashSet<String> = char_terms(content).into_iter().collect();
        let matches = prompt_chars
            .iter()
            .filter(|c| response_chars.contains(*c))
            .count();
        return (matches as f64 / prompt_chars.len() as f64).min(1.0);
    }

    let prompt_words = words(prompt);
    if prompt_words.is_empty() {
        return 0.0;
    }
    let response_words: HashSet<String> = words(content).into_iter().collect();
    let matches = prompt_words
        .iter()
        .filter(|w| w.chars().count() > constants::SIGNIFICANT_TERM_LEN)
        .filter(|w| response_words.contains(*w))
        .count();
    (matches as f64 / prompt_words.len() as f64).min(1.0)
}

/// Ratio of distinct sentences to all sentences (1.0 for text with no sentences)
pub fn sentence_uniqueness(content: &str) -> f64 {
    let sentences: Vec<String> = content
        .split(['.', '!', '?', '。', '！', '？'])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return 1.0;
    }
    let unique: HashSet<&String> = sentences.iter().collect();
    unique.len() as f64 / sentences.len() as f64
}

/// Fraction of alphabetic characters written in the language's expected script
pub fn script_match(content: &str, language: &str) -> f64 {
    let script = language::expected_script(language);
    let (matching, total) = content
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(m, t), c| {
            (m + usize::from(script.contains(c)), t + 1)
        });
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64
    }
}

/// Output-language quality in `[0, 1]`.
///
/// `&str` is always valid UTF-8, so the encoding check reduces to the
/// minimum-length threshold followed by the uniqueness/script average.
pub fn language_quality_score(content: &str, language: &str) -> f64 {
    if char_count(content.trim()) < constants::MIN_QUALITY_CHARS {
        return constants::SHORT_TEXT_QUALITY;
    }
    let quality = (sentence_uniqueness(content) + script_match(content, language)) / 2.0;
    quality.min(1.0)
}

/// Inputs needed to score one response
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub prompt: &'a str,
    pub language: &'a str,
    pub weights: &'a ScoreWeights,
}

/// Compute all five signals for a response.
///
/// `peer_similarity` is the mean similarity of the response against its
/// surviving peers (0 when it has none).
pub fn score_breakdown(
    profile: &AdapterProfile,
    content: &str,
    peer_similarity: f64,
    ctx: &ScoringContext<'_>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        base: base_score(profile, ctx.prompt, ctx.language),
        consensus: peer_similarity.clamp(0.0, 1.0),
        length: length_score(content, ctx.language),
        relevance: relevance_score(content, ctx.prompt, ctx.language),
        language_quality: language_quality_score(content, ctx.language),
    }
}

/// Final score of one response
pub fn score_response(
    profile: &AdapterProfile,
    content: &str,
    peer_similarity: f64,
    user_weight: f64,
    ctx: &ScoringContext<'_>,
) -> f64 {
    score_breakdown(profile, content, peer_similarity, ctx).total(ctx.weights, user_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adapter::CoverageTier;

    fn profile(coverage: CoverageTier, strengths: &[&str]) -> AdapterProfile {
        AdapterProfile::new("test", "Test", "test", "test-model")
            .with_strengths(strengths)
            .with_coverage(coverage)
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoreWeights {
            base: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(DomainError::InvalidWeights(_))
        ));

        let negative = ScoreWeights {
            base: -0.2,
            consensus: 0.65,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_base_score_tiers() {
        let all = profile(CoverageTier::All, &[]);
        assert!((base_score(&all, "hello", "en") - 1.5).abs() < 1e-9);

        let european = profile(CoverageTier::European, &[]);
        assert!((base_score(&european, "hello", "de") - 1.4).abs() < 1e-9);
        assert!((base_score(&european, "hello", "ja") - 1.0).abs() < 1e-9);

        let major = profile(CoverageTier::Major, &["multilingual"]);
        assert!((base_score(&major, "hello", "ja") - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_base_score_keyword_bonus_and_cap() {
        let p = profile(
            CoverageTier::All,
            &["coding", "creativity", "technical", "analysis", "multilingual"],
        );
        // 1.0 + 0.5 + 0.3 (coding) + 0.2 = 2.0
        assert!((base_score(&p, "Write code", "en") - 2.0).abs() < 1e-9);
        // every bonus would exceed the cap
        let prompt = "creative technical analysis of program code";
        assert_eq!(base_score(&p, prompt, "en"), MAX_BASE_SCORE);
    }

    #[test]
    fn test_keyword_without_strength_earns_nothing() {
        let p = profile(CoverageTier::None, &[]);
        assert!((base_score(&p, "write some code", "en") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_score() {
        let words_100 = vec!["word"; 100].join(" ");
        assert!((length_score(&words_100, "en") - 0.5).abs() < 1e-9);
        let words_400 = vec!["word"; 400].join(" ");
        assert_eq!(length_score(&words_400, "en"), 1.0);

        let chars_250: String = "字".repeat(250);
        assert!((length_score(&chars_250, "zh") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_counts_only_significant_matches() {
        // prompt words: explain, solar, power, to, me (5); significant matches: solar, power
        let score = relevance_score("Solar power is clean", "Explain solar power to me", "en");
        assert!((score - 2.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_empty_prompt() {
        assert_eq!(relevance_score("anything", "", "en"), 0.0);
        assert_eq!(relevance_score("anything", "", "zh"), 0.0);
    }

    #[test]
    fn test_relevance_logographic() {
        let score = relevance_score("太阳能很好", "太阳能", "zh");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_language_quality_short_text() {
        assert_eq!(language_quality_score("short", "en"), 0.5);
    }

    #[test]
    fn test_language_quality_repetition_penalized() {
        let varied = "Solar is growing. Wind is expanding. Hydro is stable.";
        let repeated = "Solar is growing. Solar is growing. Solar is growing.";
        assert!(language_quality_score(varied, "en") > language_quality_score(repeated, "en"));
        assert!((language_quality_score(varied, "en") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_language_quality_wrong_script() {
        let russian = "Солнечная энергия растет быстро.";
        assert!(language_quality_score(russian, "ru") > language_quality_score(russian, "en"));
    }

    #[test]
    fn test_user_weight_multiplies() {
        let p = profile(CoverageTier::All, &["multilingual"]);
        let weights = ScoreWeights::default();
        let ctx = ScoringContext {
            prompt: "renewable energy",
            language: "en",
            weights: &weights,
        };
        let once = score_response(&p, "Renewable energy is growing.", 0.5, 1.0, &ctx);
        let twice = score_response(&p, "Renewable energy is growing.", 0.5, 2.0, &ctx);
        assert!((twice - 2.0 * once).abs() < 1e-9);
        assert!(once > 0.0);
    }
}

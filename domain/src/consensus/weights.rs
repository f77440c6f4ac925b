//! Per-user adapter weights learned from explicit feedback.

use crate::core::adapter::AdapterId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight applied to adapters the user has never rated
pub const DEFAULT_USER_WEIGHT: f64 = 1.0;

/// Feedback rating for one adapter's contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRating {
    pub accuracy: f64,
    pub relevance: f64,
}

impl Default for ModelRating {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_USER_WEIGHT,
            relevance: DEFAULT_USER_WEIGHT,
        }
    }
}

impl ModelRating {
    pub fn new(accuracy: f64, relevance: f64) -> Self {
        Self {
            accuracy,
            relevance,
        }
    }

    /// Weight derived from this rating: the mean of accuracy and relevance
    pub fn weight(&self) -> f64 {
        (self.accuracy + self.relevance) / 2.0
    }
}

/// Learned weights of one user for one (language, category) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserWeights {
    weights: HashMap<AdapterId, f64>,
}

impl UserWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = (&'a AdapterId, &'a ModelRating)>) -> Self {
        Self {
            weights: ratings
                .into_iter()
                .map(|(id, rating)| (id.clone(), rating.weight()))
                .collect(),
        }
    }

    pub fn with_weight(mut self, adapter: impl Into<AdapterId>, weight: f64) -> Self {
        self.weights.insert(adapter.into(), weight);
        self
    }

    /// Weight for `adapter`, defaulting to 1.0
    pub fn weight_for(&self, adapter: &AdapterId) -> f64 {
        self.weights
            .get(adapter)
            .copied()
            .unwrap_or(DEFAULT_USER_WEIGHT)
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_weight_is_mean() {
        assert!((ModelRating::new(0.8, 0.4).weight() - 0.6).abs() < 1e-9);
        assert_eq!(ModelRating::default().weight(), 1.0);
    }

    #[test]
    fn test_missing_rating_fields_default_to_one() {
        let rating: ModelRating = serde_json::from_str(r#"{"accuracy": 0.5}"#).unwrap();
        assert_eq!(rating.relevance, 1.0);
        assert!((rating.weight() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_unrated_adapter_defaults() {
        let weights = UserWeights::new().with_weight("claude", 1.4);
        assert_eq!(weights.weight_for(&AdapterId::from("claude")), 1.4);
        assert_eq!(weights.weight_for(&AdapterId::from("gpt4")), DEFAULT_USER_WEIGHT);
    }

    #[test]
    fn test_from_ratings() {
        let mut ratings = HashMap::new();
        ratings.insert(AdapterId::from("gemini"), ModelRating::new(0.2, 0.4));
        let weights = UserWeights::from_ratings(&ratings);
        assert!((weights.weight_for(&AdapterId::from("gemini")) - 0.3).abs() < 1e-9);
    }
}

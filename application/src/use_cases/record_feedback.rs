//! Record Feedback use case
//!
//! Stores a user's ratings of the adapters that answered a prompt. Later
//! consensus rounds for the same user, language and prompt category read
//! them back as score multipliers.

use crate::ports::feedback_store::FeedbackStore;
use crate::ports::research_store::StoreError;
use consensus_domain::{AdapterId, DomainError, ModelRating, PromptCategory};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Ratings given by one user for one prompt
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub user: String,
    pub language: String,
    /// Prompt the rated answers were given for; it determines the category
    pub prompt: String,
    pub ratings: HashMap<AdapterId, ModelRating>,
}

pub struct RecordFeedbackUseCase {
    store: Arc<dyn FeedbackStore>,
}

impl RecordFeedbackUseCase {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Validate and store the ratings; returns the category they were filed under
    pub async fn execute(&self, input: FeedbackInput) -> Result<PromptCategory, FeedbackError> {
        for (adapter, rating) in &input.ratings {
            let valid = [rating.accuracy, rating.relevance]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            if !valid {
                return Err(DomainError::InvalidWeights(format!(
                    "rating for {} must be finite and non-negative",
                    adapter
                ))
                .into());
            }
        }

        let category = PromptCategory::of(&input.prompt);
        self.store
            .record_feedback(&input.user, &input.language, category, &input.ratings)
            .await?;
        info!(
            user = %input.user,
            category = %category,
            adapters = input.ratings.len(),
            "Feedback recorded"
        );
        Ok(category)
    }
}

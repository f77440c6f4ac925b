//! Feedback store port
//!
//! Explicit user ratings of adapters, keyed by user, language and prompt
//! category. The consensus engine reads them back as per-adapter weights.

use crate::ports::research_store::StoreError;
use async_trait::async_trait;
use consensus_domain::{AdapterId, ModelRating, PromptCategory, UserWeights};
use std::collections::HashMap;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Record ratings, replacing earlier ratings of the same adapters
    async fn record_feedback(
        &self,
        user: &str,
        language: &str,
        category: PromptCategory,
        ratings: &HashMap<AdapterId, ModelRating>,
    ) -> Result<(), StoreError>;

    /// Learned weights (unrated adapters default to 1.0)
    async fn weights(
        &self,
        user: &str,
        language: &str,
        category: PromptCategory,
    ) -> Result<UserWeights, StoreError>;
}

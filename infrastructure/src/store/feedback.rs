//! In-memory feedback store

use async_trait::async_trait;
use consensus_application::{FeedbackStore, StoreError};
use consensus_domain::{AdapterId, ModelRating, PromptCategory, UserWeights};
use std::collections::HashMap;
use tokio::sync::Mutex;

type FeedbackKey = (String, String, PromptCategory);

/// Ratings keyed by (user, language, prompt category)
#[derive(Default)]
pub struct InMemoryFeedbackStore {
    ratings: Mutex<HashMap<FeedbackKey, HashMap<AdapterId, ModelRating>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn record_feedback(
        &self,
        user: &str,
        language: &str,
        category: PromptCategory,
        ratings: &HashMap<AdapterId, ModelRating>,
    ) -> Result<(), StoreError> {
        let key = (user.to_string(), language.to_string(), category);
        let mut store = self.ratings.lock().await;
        let entry = store.entry(key).or_default();
        for (adapter, rating) in ratings {
            entry.insert(adapter.clone(), *rating);
        }
        Ok(())
    }

    async fn weights(
        &self,
        user: &str,
        language: &str,
        category: PromptCategory,
    ) -> Result<UserWeights, StoreError> {
        let key = (user.to_string(), language.to_string(), category);
        let store = self.ratings.lock().await;
        Ok(store
            .get(&key)
            .map(|ratings| UserWeights::from_ratings(ratings.iter()))
            .unwrap_or_default())
    }
}

//! Research record store port

use async_trait::async_trait;
use consensus_domain::{DomainError, ResearchId, ResearchRecord, ResearchRequest, ResearchUpdate};
use thiserror::Error;

/// Errors from the research store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Research not found: {0}")]
    NotFound(ResearchId),

    #[error("Rejected update: {0}")]
    InvalidUpdate(#[from] DomainError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Store for research records keyed by an opaque id
///
/// `update` must apply the whole [`ResearchUpdate`] atomically.
#[async_trait]
pub trait ResearchStore: Send + Sync {
    /// Create a `pending` record for the request
    async fn create(&self, request: ResearchRequest) -> Result<ResearchId, StoreError>;

    /// Snapshot of a record
    async fn get(&self, id: &ResearchId) -> Result<ResearchRecord, StoreError>;

    /// Apply a partial update and return the updated record
    async fn update(
        &self,
        id: &ResearchId,
        update: ResearchUpdate,
    ) -> Result<ResearchRecord, StoreError>;
}

//! In-memory research record store

use async_trait::async_trait;
use consensus_application::{ResearchStore, StoreError};
use consensus_domain::{ResearchId, ResearchRecord, ResearchRequest, ResearchUpdate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Research records held in process memory.
///
/// Each update is applied under one lock, so readers never observe a
/// half-applied [`ResearchUpdate`].
#[derive(Default)]
pub struct InMemoryResearchStore {
    records: Mutex<HashMap<ResearchId, ResearchRecord>>,
    next_id: AtomicU64,
}

impl InMemoryResearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self) -> ResearchId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        ResearchId::new(format!(
            "research-{}-{}",
            chrono::Utc::now().format("%Y%m%d%H%M%S"),
            n
        ))
    }

    /// Snapshot of every record, oldest first
    pub async fn list(&self) -> Vec<ResearchRecord> {
        let mut records: Vec<ResearchRecord> =
            self.records.lock().await.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }
}

#[async_trait]
impl ResearchStore for InMemoryResearchStore {
    async fn create(&self, request: ResearchRequest) -> Result<ResearchId, StoreError> {
        let id = self.generate_id();
        let record = ResearchRecord::new(id.clone(), request);
        self.records.lock().await.insert(id.clone(), record);
        debug!(research = %id, "Research record created");
        Ok(id)
    }

    async fn get(&self, id: &ResearchId) -> Result<ResearchRecord, StoreError> {
        self.records
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn update(
        &self,
        id: &ResearchId,
        update: ResearchUpdate,
    ) -> Result<ResearchRecord, StoreError> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        record.apply(update)?;
        Ok(record.clone())
    }
}

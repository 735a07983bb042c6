//! Storage for progress records.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProgressError;
use crate::record::{ProgressRecord, ProgressUpdate};

/// Document store holding one record per kid name.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// All records, most recently played first.
    async fn list(&self) -> Result<Vec<ProgressRecord>, ProgressError>;

    async fn get(&self, id: Uuid) -> Result<ProgressRecord, ProgressError>;

    /// Insert a new record with defaults. Kid names are unique.
    async fn create(&self, kid_name: &str) -> Result<ProgressRecord, ProgressError>;

    /// Apply `update` and refresh `last_played`.
    async fn update_progress(
        &self,
        id: Uuid,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, ProgressError>;
}

/// In-process store, used by the service by default and in tests.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: RwLock<HashMap<Uuid, ProgressRecord>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn list(&self) -> Result<Vec<ProgressRecord>, ProgressError> {
        let records = self.records.read().await;
        let mut all: Vec<ProgressRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| {
            b.last_played
                .cmp(&a.last_played)
                .then_with(|| a.kid_name.cmp(&b.kid_name))
        });
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> Result<ProgressRecord, ProgressError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ProgressError::NotFound)
    }

    async fn create(&self, kid_name: &str) -> Result<ProgressRecord, ProgressError> {
        let mut records = self.records.write().await;
        if records.values().any(|r| r.kid_name == kid_name) {
            return Err(ProgressError::Duplicate(kid_name.to_string()));
        }
        let record = ProgressRecord::new(kid_name);
        records.insert(record.id, record.clone());
        tracing::info!(id = %record.id, kid_name, "progress record created");
        Ok(record)
    }

    async fn update_progress(
        &self,
        id: Uuid,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, ProgressError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(ProgressError::NotFound)?;
        update.apply(record, Utc::now());
        tracing::debug!(%id, ?update, "progress updated");
        Ok(record.clone())
    }
}

//! Mock catalog store for testing.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, CatalogStore, ProductRecord, RecordId};

/// A recorded store call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogCall {
    FetchCandidates,
    Rename { id: RecordId, new_name: String },
}

/// Mock implementation of the CatalogStore trait.
///
/// Provides controllable behavior for testing:
/// - In-memory records, renamed in place
/// - Track calls for assertions
/// - Simulate fetch and per-record rename failures
#[derive(Debug, Default)]
pub struct MockCatalogStore {
    /// Records in store order.
    records: Arc<RwLock<Vec<ProductRecord>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCatalogCall>>>,
    /// Records whose rename fails.
    failing_renames: Arc<RwLock<HashSet<RecordId>>>,
    /// If set, the next fetch will fail with this error.
    next_fetch_error: Arc<RwLock<Option<CatalogError>>>,
}

impl MockCatalogStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store holding the given records.
    pub async fn with_records(records: Vec<ProductRecord>) -> Self {
        let store = Self::new();
        store.set_records(records).await;
        store
    }

    /// Add a record.
    pub async fn add_record(&self, record: ProductRecord) {
        self.records.write().await.push(record);
    }

    /// Replace all records.
    pub async fn set_records(&self, records: Vec<ProductRecord>) {
        *self.records.write().await = records;
    }

    /// Current record with the given id.
    pub async fn get(&self, id: &str) -> Option<ProductRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
    }

    /// Make renames of this record fail.
    pub async fn fail_rename(&self, id: &str) {
        self.failing_renames.write().await.insert(RecordId::new(id));
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_fetch_error(&self, error: CatalogError) {
        *self.next_fetch_error.write().await = Some(error);
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCatalogCall> {
        self.calls.read().await.clone()
    }

    /// Recorded renames as `(id, new_name)` pairs.
    pub async fn renames(&self) -> Vec<(String, String)> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedCatalogCall::Rename { id, new_name } => {
                    Some((id.to_string(), new_name.clone()))
                }
                RecordedCatalogCall::FetchCandidates => None,
            })
            .collect()
    }

    async fn record(&self, call: RecordedCatalogCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl CatalogStore for MockCatalogStore {
    async fn fetch_candidates(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        self.record(RecordedCatalogCall::FetchCandidates).await;

        if let Some(err) = self.next_fetch_error.write().await.take() {
            return Err(err);
        }

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.external_id().is_some())
            .cloned()
            .collect())
    }

    async fn rename(&self, id: &RecordId, new_name: &str) -> Result<(), CatalogError> {
        self.record(RecordedCatalogCall::Rename {
            id: id.clone(),
            new_name: new_name.to_string(),
        })
        .await;

        if self.failing_renames.read().await.contains(id) {
            return Err(CatalogError::ApiError {
                status: 503,
                message: "simulated write failure".to_string(),
            });
        }

        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.name = new_name.to_string();
                Ok(())
            }
            None => Err(CatalogError::NotFound(id.to_string())),
        }
    }
}

//! In-memory `TwinStore`, used for local runs and tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use twin_types::TwinRecord;

use crate::store::{StoreError, TwinStore};

/// Records keyed by `(partition_key, id)`.
#[derive(Debug, Default)]
pub struct MemoryTwinStore {
    records: RwLock<BTreeMap<(String, String), TwinRecord>>,
}

impl MemoryTwinStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Storage {
        message: format!("lock poisoned: {e}"),
    }
}

#[async_trait]
impl TwinStore for MemoryTwinStore {
    async fn upsert(&self, record: &TwinRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(
            (record.country_id.clone(), record.id.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn read(&self, id: &str, partition_key: &str) -> Result<TwinRecord, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        records
            .get(&(partition_key.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                id: id.to_string(),
                partition_key: partition_key.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<TwinRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }
}

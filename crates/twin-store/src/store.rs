//! Abstract store trait (port) for Twin records.

use async_trait::async_trait;
use thiserror::Error;

use twin_types::{ErrorKind, TwinError, TwinRecord};

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists in the partition.
    #[error("record not found: {id} (partition {partition_key})")]
    NotFound { id: String, partition_key: String },
    /// The backend rejected or failed the operation.
    #[error("storage error: {message}")]
    Storage { message: String },
    /// The backend could not be reached.
    #[error("connection error: {message}")]
    Connection { message: String },
}

impl From<StoreError> for TwinError {
    fn from(e: StoreError) -> Self {
        let kind = match &e {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Connection { .. } => ErrorKind::Unavailable,
            StoreError::Storage { .. } => ErrorKind::Internal,
        };
        TwinError::new(kind, e.to_string())
    }
}

/// Abstract trait for Twin persistence, partitioned by country id.
///
/// Implementations must be safe for concurrent use; the dispatcher shares
/// one handle across all in-flight requests.
#[async_trait]
pub trait TwinStore: Send + Sync {
    /// Inserts the record or replaces the one with the same id and partition.
    async fn upsert(&self, record: &TwinRecord) -> Result<(), StoreError>;

    /// Reads one record by id within a partition.
    async fn read(&self, id: &str, partition_key: &str) -> Result<TwinRecord, StoreError>;

    /// Lists every record across all partitions.
    async fn list(&self) -> Result<Vec<TwinRecord>, StoreError>;
}

//! Driven port for the derived record store.
//!
//! The store is the only shared mutable state in the service. Every method
//! is atomic with respect to concurrent callers; adapters must serialise
//! access internally.

use async_trait::async_trait;

use crate::domain::{DerivedRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// No record is stored under the identifier.
        NotFound { user_id: i64 } => "no record stored for user {user_id}",
    }
}

/// Keyed storage for derived records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or overwrite the record keyed by `record.user_id`.
    async fn put(&self, record: DerivedRecord) -> Result<(), RecordStoreError>;

    /// Fetch one record.
    async fn get(&self, user_id: UserId) -> Result<DerivedRecord, RecordStoreError>;

    /// Remove one record and return it.
    async fn delete(&self, user_id: UserId) -> Result<DerivedRecord, RecordStoreError>;

    /// Snapshot every record in first-insertion order.
    async fn list_all(&self) -> Result<Vec<DerivedRecord>, RecordStoreError>;

    /// Number of stored records.
    async fn len(&self) -> Result<usize, RecordStoreError>;
}

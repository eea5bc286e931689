//! In-memory record store adapter.
//!
//! Records live for the lifetime of the process. A single mutex guards the
//! whole map so every port operation is atomic; no lock is held across an
//! await point.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{RecordStore, RecordStoreError};
use crate::domain::{DerivedRecord, UserId};

#[derive(Debug, Default)]
struct Entries {
    ordered: Vec<DerivedRecord>,
    index: HashMap<UserId, usize>,
}

impl Entries {
    fn put(&mut self, record: DerivedRecord) {
        match self.index.get(&record.user_id) {
            Some(&slot) => self.ordered[slot] = record,
            None => {
                self.index.insert(record.user_id, self.ordered.len());
                self.ordered.push(record);
            }
        }
    }

    fn remove(&mut self, user_id: UserId) -> Option<DerivedRecord> {
        let slot = self.index.remove(&user_id)?;
        let removed = self.ordered.remove(slot);
        for later in &self.ordered[slot..] {
            if let Some(position) = self.index.get_mut(&later.user_id) {
                *position -= 1;
            }
        }
        Some(removed)
    }

    #[cfg(test)]
    fn index_matches_order(&self) -> bool {
        self.index.len() == self.ordered.len()
            && self
                .ordered
                .iter()
                .enumerate()
                .all(|(slot, record)| self.index.get(&record.user_id) == Some(&slot))
    }
}

/// Process-local [`RecordStore`] preserving first-insertion order.
///
/// Overwriting an existing id keeps its original position.
///
/// # Examples
/// ```
/// use dataproc::outbound::memory::InMemoryRecordStore;
///
/// let store = InMemoryRecordStore::new();
/// # let _ = store;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    entries: Mutex<Entries>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Every mutation completes before the guard drops, so a poisoned
        // lock still holds a consistent map.
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("record store lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: DerivedRecord) -> Result<(), RecordStoreError> {
        self.lock().put(record);
        Ok(())
    }

    async fn get(&self, user_id: UserId) -> Result<DerivedRecord, RecordStoreError> {
        let entries = self.lock();
        entries
            .index
            .get(&user_id)
            .map(|&slot| entries.ordered[slot].clone())
            .ok_or_else(|| RecordStoreError::not_found(user_id.get()))
    }

    async fn delete(&self, user_id: UserId) -> Result<DerivedRecord, RecordStoreError> {
        self.lock()
            .remove(user_id)
            .ok_or_else(|| RecordStoreError::not_found(user_id.get()))
    }

    async fn list_all(&self) -> Result<Vec<DerivedRecord>, RecordStoreError> {
        Ok(self.lock().ordered.clone())
    }

    async fn len(&self) -> Result<usize, RecordStoreError> {
        Ok(self.lock().ordered.len())
    }
}

//! Processed user domain service.
//!
//! Implements the command and query driving ports on top of the
//! [`RecordStore`] driven port. Timestamps come from an injected clock so
//! records are reproducible under test.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ProcessedUsersCommand, ProcessedUsersQuery, RecordStore, RecordStoreError,
};
use crate::domain::{DerivedRecord, Error, RawUser, UserId};

const NOT_FOUND_MESSAGE: &str = "Processed user data not found";

fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::NotFound { user_id } => {
            Error::not_found(NOT_FOUND_MESSAGE).with_details(serde_json::json!({ "userId": user_id }))
        }
    }
}

/// Service deriving, storing and serving processed user records.
#[derive(Clone)]
pub struct ProcessingService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl ProcessingService {
    /// Create the service over a record store and a clock.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl ProcessedUsersCommand for ProcessingService {
    async fn process_user(&self, user: RawUser) -> Result<UserId, Error> {
        let user_id = user.require_id().map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": "id", "code": "missing_id" }))
        })?;

        let record = DerivedRecord::build(user_id, &user, self.clock.local());
        self.store.put(record).await.map_err(map_store_error)?;

        info!(user_id = user_id.get(), name = %user.name, "processed user");
        Ok(user_id)
    }

    async fn delete(&self, user_id: UserId) -> Result<DerivedRecord, Error> {
        let removed = self.store.delete(user_id).await.map_err(map_store_error)?;
        info!(user_id = user_id.get(), "deleted processed user");
        Ok(removed)
    }
}

#[async_trait]
impl ProcessedUsersQuery for ProcessingService {
    async fn get(&self, user_id: UserId) -> Result<DerivedRecord, Error> {
        self.store.get(user_id).await.map_err(map_store_error)
    }

    async fn list(&self) -> Result<Vec<DerivedRecord>, Error> {
        self.store.list_all().await.map_err(map_store_error)
    }

    async fn count(&self) -> Result<usize, Error> {
        self.store.len().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "processing_service_tests.rs"]
mod tests;

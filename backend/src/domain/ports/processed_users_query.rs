//! Driving port for reading processed user records.

use async_trait::async_trait;

use crate::domain::{DerivedRecord, Error, UserId};

/// Use-case port for reads against processed user data.
#[async_trait]
pub trait ProcessedUsersQuery: Send + Sync {
    /// Fetch one record, or [`crate::domain::ErrorCode::NotFound`].
    async fn get(&self, user_id: UserId) -> Result<DerivedRecord, Error>;

    /// Every stored record in first-insertion order.
    async fn list(&self) -> Result<Vec<DerivedRecord>, Error>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, Error>;
}

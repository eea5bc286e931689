//! Driving port for mutating processed user records.
//!
//! Inbound adapters call this port to derive and store records, or to remove
//! them, without reaching into the store directly.

use async_trait::async_trait;

use crate::domain::{DerivedRecord, Error, RawUser, UserId};

/// Use-case port for writes against processed user data.
#[async_trait]
pub trait ProcessedUsersCommand: Send + Sync {
    /// Validate, derive and store `user`, overwriting any previous record.
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the id is
    /// missing or zero.
    async fn process_user(&self, user: RawUser) -> Result<UserId, Error>;

    /// Remove the record for `user_id` and return it.
    async fn delete(&self, user_id: UserId) -> Result<DerivedRecord, Error>;
}

//! Diagnostics and batch operations against the peer service.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{PeerOperations, PeerService, PeerServiceError, ProcessedUsersQuery};

/// Status this service reports for itself in diagnostics.
pub const SELF_STATUS: &str = "healthy";

/// Result of one independent peer probe.
///
/// Serialised as `{"status":"success", ...}` or
/// `{"status":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome<T> {
    Success(T),
    Error { error: String },
}

/// Successful health probe payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthProbe {
    /// Body returned by the peer health endpoint.
    #[schema(value_type = Object)]
    pub response: Value,
}

/// Successful user listing probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersProbe {
    /// Number of entries in the peer listing.
    pub count: usize,
}

/// Individual probe results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeerProbes {
    /// Outcome of `GET /health` on the peer.
    #[schema(value_type = Object)]
    pub service1_health: ProbeOutcome<HealthProbe>,
    /// Outcome of `GET /users` on the peer.
    #[schema(value_type = Object)]
    pub service1_users: ProbeOutcome<UsersProbe>,
}

/// Cross-service diagnostic report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CrossServiceReport {
    /// Independent peer probe results.
    pub cross_service_test: PeerProbes,
    /// Status of this service; always healthy while it can answer.
    pub service2_status: String,
    /// Records held locally.
    pub processed_users_count: usize,
}

/// Result of a batch re-processing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchOutcome {
    #[schema(example = "Batch processing completed")]
    pub message: String,
    /// Users returned by the peer listing.
    pub total_users: usize,
    /// Submissions the peer accepted.
    pub processed_count: usize,
}

/// Number of entries in a user listing body: array items or object keys.
fn listing_len(body: Value) -> Result<usize, PeerServiceError> {
    match body {
        Value::Array(items) => Ok(items.len()),
        Value::Object(fields) => Ok(fields.len()),
        other => Err(PeerServiceError::decode(format!(
            "user listing has no length: {other}"
        ))),
    }
}

/// Peer operations use-case.
#[derive(Clone)]
pub struct PeerOperationsService {
    peer: Arc<dyn PeerService>,
    records: Arc<dyn ProcessedUsersQuery>,
}

impl PeerOperationsService {
    /// Create the service over the peer client and the local record query.
    pub fn new(peer: Arc<dyn PeerService>, records: Arc<dyn ProcessedUsersQuery>) -> Self {
        Self { peer, records }
    }
}

#[async_trait]
impl PeerOperations for PeerOperationsService {
    async fn cross_service_test(&self) -> CrossServiceReport {
        let service1_health = match self.peer.health().await {
            Ok(response) => ProbeOutcome::Success(HealthProbe { response }),
            Err(err) => ProbeOutcome::Error {
                error: err.to_string(),
            },
        };
        let service1_users = match self.peer.users_snapshot().await.and_then(listing_len) {
            Ok(count) => ProbeOutcome::Success(UsersProbe { count }),
            Err(err) => ProbeOutcome::Error {
                error: err.to_string(),
            },
        };
        let processed_users_count = self.records.count().await.unwrap_or_else(|err| {
            error!(error = %err, "record count unavailable for diagnostics");
            0
        });

        CrossServiceReport {
            cross_service_test: PeerProbes {
                service1_health,
                service1_users,
            },
            service2_status: SELF_STATUS.to_owned(),
            processed_users_count,
        }
    }

    async fn batch_process(&self) -> Result<BatchOutcome, Error> {
        let users = self.peer.list_users().await.map_err(|err| {
            error!(error_kind = err.kind(), error = %err, "batch fetch from peer failed");
            Error::upstream(format!("Batch processing failed: {err}"))
        })?;

        let mut processed_count = 0;
        for user in &users {
            match self.peer.submit_user(user).await {
                Ok(()) => processed_count += 1,
                Err(err) => debug!(error = %err, "peer rejected batch submission; skipping"),
            }
        }

        info!(total_users = users.len(), processed_count, "batch processing completed");
        Ok(BatchOutcome {
            message: "Batch processing completed".to_owned(),
            total_users: users.len(),
            processed_count,
        })
    }
}

//! Driving port for operations that exercise the peer service directly.

use async_trait::async_trait;

use crate::domain::{BatchOutcome, CrossServiceReport, Error};

/// Use-case port for peer diagnostics and batch re-processing.
#[async_trait]
pub trait PeerOperations: Send + Sync {
    /// Probe the peer's health and user listing independently.
    async fn cross_service_test(&self) -> CrossServiceReport;

    /// Re-submit every peer user to the peer's processing endpoint.
    ///
    /// Fails with [`crate::domain::ErrorCode::UpstreamFailure`] only when the
    /// initial user listing fails.
    async fn batch_process(&self) -> Result<BatchOutcome, Error>;
}

//! Driven port for the peer user service.
//!
//! The domain owns the call contract and the failure taxonomy so the
//! analytics fallback can be exercised without a network.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Typed failures surfaced while calling the peer service.
    pub enum PeerServiceError {
        /// The call did not complete within the configured timeout.
        Timeout { message: String } =>
            "peer request timed out: {message}",
        /// The connection could not be established or was dropped.
        Connection { message: String } =>
            "peer connection failed: {message}",
        /// The peer answered with a non-success status.
        BadStatus { status: u16, message: String } =>
            "peer returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "peer response decode failed: {message}",
    }
}

impl PeerServiceError {
    /// Short machine-readable label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Connection { .. } => "connection",
            Self::BadStatus { .. } => "bad_status",
            Self::Decode { .. } => "decode",
        }
    }
}

/// Client-side contract of the peer service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeerService: Send + Sync {
    /// Fetch the canonical age for one user.
    async fn fetch_user_age(&self, user_id: UserId) -> Result<f64, PeerServiceError>;

    /// Call the peer health endpoint and return its JSON body.
    ///
    /// Any status is accepted as long as the body is JSON; only transport
    /// and decode failures are errors.
    async fn health(&self) -> Result<Value, PeerServiceError>;

    /// Fetch every raw user the peer holds. Non-success statuses fail.
    async fn list_users(&self) -> Result<Vec<Value>, PeerServiceError>;

    /// Read the peer user listing body as-is, whatever the status.
    async fn users_snapshot(&self) -> Result<Value, PeerServiceError>;

    /// Submit one user to the peer's own processing endpoint.
    async fn submit_user(&self, user: &Value) -> Result<(), PeerServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PeerServiceError::timeout("10s"), "timeout")]
    #[case(PeerServiceError::connection("refused"), "connection")]
    #[case(PeerServiceError::bad_status(404_u16, "missing"), "bad_status")]
    #[case(PeerServiceError::decode("no age"), "decode")]
    fn kinds_are_stable(#[case] error: PeerServiceError, #[case] expected: &str) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn bad_status_message_includes_code() {
        let error = PeerServiceError::bad_status(503_u16, "maintenance");
        assert_eq!(error.to_string(), "peer returned status 503: maintenance");
    }
}

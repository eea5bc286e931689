//! Live age lookup with a deterministic category fallback.
//!
//! Analytics must always produce a number. Every peer failure is therefore
//! absorbed here and replaced by the estimate for the stored category.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{PeerService, PeerServiceError};
use crate::domain::{AgeCategory, UserId};

/// Outcome of one age resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAge {
    /// Age reported by the peer service.
    Live(f64),
    /// Category estimate used because the peer call failed.
    Estimated {
        age: f64,
        cause: PeerServiceError,
    },
}

impl ResolvedAge {
    /// Numeric age regardless of provenance.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Live(age) | Self::Estimated { age, .. } => *age,
        }
    }

    /// Whether the value came from the fallback policy.
    #[must_use]
    pub fn is_estimate(&self) -> bool {
        matches!(self, Self::Estimated { .. })
    }
}

/// Resolves ages through the peer service, falling back on failure.
#[derive(Clone)]
pub struct AgeResolver {
    peer: Arc<dyn PeerService>,
}

impl AgeResolver {
    /// Create a resolver backed by `peer`.
    pub fn new(peer: Arc<dyn PeerService>) -> Self {
        Self { peer }
    }

    /// Resolve the age for `user_id`; never fails.
    pub async fn resolve(&self, user_id: UserId, category: AgeCategory) -> ResolvedAge {
        match self.peer.fetch_user_age(user_id).await {
            Ok(age) => ResolvedAge::Live(age),
            Err(cause) => {
                let age = category.fallback_age();
                warn!(
                    user_id = user_id.get(),
                    error_kind = cause.kind(),
                    error = %cause,
                    %category,
                    estimate = age,
                    "peer age lookup failed; using category estimate"
                );
                ResolvedAge::Estimated { age, cause }
            }
        }
    }
}

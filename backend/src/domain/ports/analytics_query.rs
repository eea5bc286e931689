//! Driving port for the analytics summary.

use async_trait::async_trait;

use crate::domain::AggregateSummary;

/// Use-case port producing aggregate statistics.
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    /// Compute a fresh summary. Never fails; peer outages degrade to estimates.
    async fn summarize(&self) -> AggregateSummary;
}

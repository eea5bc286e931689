//! Cross-record analytics.
//!
//! The summary is recomputed on every request from the current store
//! contents. Ages are resolved per record through [`AgeResolver`] with a
//! bounded fan-out; sum and histogram are order independent, so completion
//! order does not affect the result.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::ports::{AnalyticsQuery, RecordStore};
use crate::domain::record::{CONFIDENCE_LEVEL, DATA_QUALITY_SCORE, PROCESSING_TIME_MS};
use crate::domain::{AgeCategory, AgeResolver};

/// Default number of concurrent peer lookups during aggregation.
pub const DEFAULT_LOOKUP_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};

/// Synthesised processing statistics. Only `total_processed` is measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessingStats {
    /// Number of stored records.
    pub total_processed: usize,
    pub avg_processing_time_ms: u64,
    pub avg_confidence_level: f64,
    pub avg_data_quality_score: f64,
}

impl ProcessingStats {
    fn for_count(total_processed: usize) -> Self {
        Self {
            total_processed,
            avg_processing_time_ms: PROCESSING_TIME_MS,
            avg_confidence_level: CONFIDENCE_LEVEL,
            avg_data_quality_score: DATA_QUALITY_SCORE,
        }
    }
}

/// Aggregate statistics across every stored record.
///
/// An empty store serialises `age_distribution` and `processing_stats` as
/// empty objects.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AggregateSummary {
    /// Number of stored records.
    pub total_users: usize,
    /// Mean age rounded to two decimal places.
    pub average_age: f64,
    /// Record count per age category; empty when nothing is stored.
    pub age_distribution: BTreeMap<AgeCategory, u64>,
    /// Fixed processing statistics, or `{}` when nothing is stored.
    #[serde(serialize_with = "empty_object_when_none")]
    #[schema(value_type = Object)]
    pub processing_stats: Option<ProcessingStats>,
}

impl AggregateSummary {
    /// Summary reported when nothing has been processed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_users: 0,
            average_age: 0.0,
            age_distribution: BTreeMap::new(),
            processing_stats: None,
        }
    }
}

fn empty_object_when_none<S>(stats: &Option<ProcessingStats>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;

    match stats {
        Some(stats) => stats.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Round to two decimal places, sending exact halves to the even neighbour.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Analytics use-case backed by the record store and the age resolver.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
    resolver: AgeResolver,
    concurrency: NonZeroUsize,
}

impl AnalyticsService {
    /// Create the service with the default lookup concurrency.
    pub fn new(store: Arc<dyn RecordStore>, resolver: AgeResolver) -> Self {
        Self::with_concurrency(store, resolver, DEFAULT_LOOKUP_CONCURRENCY)
    }

    /// Create the service with an explicit lookup concurrency.
    ///
    /// A concurrency of one performs lookups strictly one at a time.
    pub fn with_concurrency(
        store: Arc<dyn RecordStore>,
        resolver: AgeResolver,
        concurrency: NonZeroUsize,
    ) -> Self {
        Self {
            store,
            resolver,
            concurrency,
        }
    }
}

#[async_trait]
impl AnalyticsQuery for AnalyticsService {
    async fn summarize(&self) -> AggregateSummary {
        let records = match self.store.list_all().await {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "record store listing failed; reporting empty analytics");
                return AggregateSummary::empty();
            }
        };
        if records.is_empty() {
            return AggregateSummary::empty();
        }

        let mut age_distribution: BTreeMap<AgeCategory, u64> =
            AgeCategory::ALL.into_iter().map(|category| (category, 0)).collect();
        for record in &records {
            *age_distribution
                .entry(record.processed_data.age_category)
                .or_default() += 1;
        }

        let resolver = &self.resolver;
        let keys: Vec<_> = records
            .iter()
            .map(|record| (record.user_id, record.processed_data.age_category))
            .collect();
        let lookups = keys
            .into_iter()
            .map(|(user_id, category)| async move { resolver.resolve(user_id, category).await });
        let (sum, estimated) = stream::iter(lookups)
            .buffer_unordered(self.concurrency.get())
            .fold((0.0_f64, 0_usize), |(sum, estimated), resolved| async move {
                (sum + resolved.value(), estimated + usize::from(resolved.is_estimate()))
            })
            .await;

        let total_users = records.len();
        let average_age = round_to_cents(sum / total_users as f64);
        debug!(total_users, estimated, average_age, "analytics summary computed");

        AggregateSummary {
            total_users,
            average_age,
            age_distribution,
            processing_stats: Some(ProcessingStats::for_count(total_users)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPeerService, MockRecordStore, PeerServiceError, RecordStoreError};
    use crate::domain::{DerivedRecord, RawUser, UserId};
    use chrono::Local;
    use rstest::rstest;
    use serde_json::json;

    fn record(id: i64, age: i64) -> DerivedRecord {
        let raw = RawUser {
            id: Some(id),
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
            age,
        };
        DerivedRecord::build(UserId::new(id).expect("fixture id"), &raw, Local::now())
    }

    fn store_with(records: Vec<DerivedRecord>) -> Arc<dyn RecordStore> {
        let mut store = MockRecordStore::new();
        store
            .expect_list_all()
            .times(1)
            .return_once(move || Ok(records));
        Arc::new(store)
    }

    fn service(store: Arc<dyn RecordStore>, peer: MockPeerService) -> AnalyticsService {
        AnalyticsService::new(store, AgeResolver::new(Arc::new(peer)))
    }

    #[tokio::test]
    async fn empty_store_reports_zeros_without_peer_calls() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age().times(0);

        let summary = service(store_with(Vec::new()), peer).summarize().await;

        assert_eq!(summary, AggregateSummary::empty());
        assert_eq!(
            serde_json::to_value(&summary).expect("summary serialises"),
            json!({
                "total_users": 0,
                "average_age": 0.0,
                "age_distribution": {},
                "processing_stats": {}
            })
        );
    }

    #[tokio::test]
    async fn averages_live_ages_and_counts_categories() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age()
            .times(3)
            .returning(|id| Ok(match id.get() {
                1 => 21.0,
                2 => 35.0,
                _ => 71.0,
            }));

        let summary = service(store_with(vec![record(1, 21), record(2, 35), record(3, 71)]), peer)
            .summarize()
            .await;

        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.average_age, 42.33);
        assert_eq!(
            summary.age_distribution,
            BTreeMap::from([
                (AgeCategory::Young, 1),
                (AgeCategory::Middle, 1),
                (AgeCategory::Senior, 1),
            ])
        );
        assert_eq!(summary.processing_stats, Some(ProcessingStats::for_count(3)));
    }

    #[tokio::test]
    async fn unreachable_peer_uses_category_estimates() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age()
            .times(3)
            .returning(|_| Err(PeerServiceError::connection("connection refused")));

        let summary = service(store_with(vec![record(1, 19), record(2, 44), record(3, 44)]), peer)
            .summarize()
            .await;

        // (25 + 40 + 40) / 3
        assert_eq!(summary.average_age, 35.0);
        assert_eq!(summary.age_distribution[&AgeCategory::Middle], 2);
        assert_eq!(summary.age_distribution[&AgeCategory::Senior], 0);
    }

    #[tokio::test]
    async fn mixes_live_and_estimated_ages() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age().times(2).returning(|id| {
            if id.get() == 1 {
                Ok(30.0)
            } else {
                Err(PeerServiceError::timeout("deadline elapsed"))
            }
        });

        let summary = service(store_with(vec![record(1, 30), record(2, 60)]), peer)
            .summarize()
            .await;

        assert_eq!(summary.average_age, 45.0);
    }

    #[tokio::test]
    async fn sequential_lookups_give_the_same_result() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age()
            .times(2)
            .returning(|id| Ok(if id.get() == 1 { 10.0 } else { 11.0 }));
        let analytics = AnalyticsService::with_concurrency(
            store_with(vec![record(1, 10), record(2, 11)]),
            AgeResolver::new(Arc::new(peer)),
            NonZeroUsize::MIN,
        );

        assert_eq!(analytics.summarize().await.average_age, 10.5);
    }

    #[tokio::test]
    async fn store_error_reports_empty_summary() {
        let mut store = MockRecordStore::new();
        store
            .expect_list_all()
            .return_once(|| Err(RecordStoreError::not_found(0_i64)));
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age().times(0);

        let summary = service(Arc::new(store), peer).summarize().await;

        assert_eq!(summary, AggregateSummary::empty());
    }

    #[tokio::test]
    async fn exact_half_cent_average_rounds_to_even() {
        let mut peer = MockPeerService::new();
        peer.expect_fetch_user_age()
            .times(8)
            .returning(|id| Ok(if id.get() == 1 { 21.0 } else { 20.0 }));
        let records = (1..=8).map(|id| record(id, 20)).collect();

        let summary = service(store_with(records), peer).summarize().await;

        // 161 / 8 = 20.125
        assert_eq!(summary.average_age, 20.12);
    }

    #[rstest]
    #[case(42.333_333, 42.33)]
    #[case(10.005_1, 10.01)]
    #[case(20.125, 20.12)]
    #[case(20.375, 20.38)]
    #[case(0.0, 0.0)]
    fn rounds_to_two_decimals(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_to_cents(value), expected);
    }
}

//! Stored per-user derived record.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DerivedFields, RawUser, UserId, derive};

/// Simulated processing latency reported for every record, in milliseconds.
pub const PROCESSING_TIME_MS: u64 = 150;
/// Fixed data quality score attached to every record.
pub const DATA_QUALITY_SCORE: f64 = 0.95;
/// Fixed confidence level attached to every record.
pub const CONFIDENCE_LEVEL: f64 = 0.88;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Constant-valued processing metadata. Nothing here is measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessingMetadata {
    /// Reported processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Reported data quality score between 0 and 1.
    pub data_quality_score: f64,
    /// Reported confidence level between 0 and 1.
    pub confidence_level: f64,
}

impl Default for ProcessingMetadata {
    fn default() -> Self {
        Self {
            processing_time_ms: PROCESSING_TIME_MS,
            data_quality_score: DATA_QUALITY_SCORE,
            confidence_level: CONFIDENCE_LEVEL,
        }
    }
}

/// Derived data stored for one user.
///
/// The age category inside `processed_data` is fixed when the record is
/// built and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DerivedRecord {
    /// Identifier the record is stored under.
    pub user_id: UserId,
    /// Fields computed from the raw user.
    pub processed_data: DerivedFields,
    /// Local wall-clock creation time, ISO-8601 without offset.
    #[schema(example = "2026-10-16T09:30:00.000000")]
    pub processing_timestamp: String,
    pub analytics: ProcessingMetadata,
}

impl DerivedRecord {
    /// Derive and stamp a record for an already validated user.
    ///
    /// # Examples
    /// ```
    /// use chrono::Local;
    /// use dataproc::domain::{DerivedRecord, RawUser, UserId};
    ///
    /// let raw = RawUser {
    ///     id: Some(3),
    ///     name: "Lin".to_owned(),
    ///     email: "lin@example.org".to_owned(),
    ///     age: 52,
    /// };
    /// let id = raw.require_id().expect("id present");
    /// let record = DerivedRecord::build(id, &raw, Local::now());
    /// assert_eq!(record.user_id, id);
    /// ```
    #[must_use]
    pub fn build(user_id: UserId, user: &RawUser, now: DateTime<Local>) -> Self {
        Self {
            user_id,
            processed_data: derive(user),
            processing_timestamp: now.naive_local().format(TIMESTAMP_FORMAT).to_string(),
            analytics: ProcessingMetadata::default(),
        }
    }
}

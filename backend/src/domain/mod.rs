//! Domain primitives, services and ports.
//!
//! Purpose: derive per-user records from raw input, keep them in a keyed
//! store, and aggregate them with ages resolved through the peer service.
//! Types here are transport agnostic; inbound and outbound adapters depend
//! on this module, never the other way round.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and stable error identifier.
//! - RawUser, UserId: caller input and its validated key.
//! - DerivedFields, DerivedRecord: the stored processing output.
//! - ProcessingService, AnalyticsService, PeerOperationsService: the
//!   use-cases behind the HTTP surface.

pub mod age_resolver;
pub mod analytics;
pub mod derivation;
pub mod error;
pub mod peer_operations;
pub mod ports;
pub mod processing_service;
pub mod record;
pub mod trace_id;
pub mod user;

pub use self::age_resolver::{AgeResolver, ResolvedAge};
pub use self::analytics::{
    AggregateSummary, AnalyticsService, DEFAULT_LOOKUP_CONCURRENCY, ProcessingStats,
};
pub use self::derivation::{AgeCategory, DerivedFields, UNKNOWN_EMAIL_DOMAIN, derive};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::peer_operations::{
    BatchOutcome, CrossServiceReport, HealthProbe, PeerOperationsService, PeerProbes,
    ProbeOutcome, SELF_STATUS, UsersProbe,
};
pub use self::processing_service::ProcessingService;
pub use self::record::{DerivedRecord, ProcessingMetadata};
pub use self::trace_id::TraceId;
pub use self::user::{RawUser, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use dataproc::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

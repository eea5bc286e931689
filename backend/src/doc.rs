//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the domain schemas they exchange. The generated document backs
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    AgeCategory, AggregateSummary, BatchOutcome, CrossServiceReport, DerivedFields,
    DerivedRecord, Error, ErrorCode, HealthProbe, PeerProbes, ProcessingMetadata,
    ProcessingStats, RawUser, UsersProbe,
};
use crate::inbound::http::health::{HealthStatus, ServiceBanner};
use crate::inbound::http::processed_users::{DeleteResponse, ProcessUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Data processing service API",
        description = "Derives per-user records, serves analytics over them and probes the peer user service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::health,
        crate::inbound::http::processed_users::process_user,
        crate::inbound::http::processed_users::get_processed_user,
        crate::inbound::http::processed_users::list_processed_users,
        crate::inbound::http::processed_users::delete_processed_user,
        crate::inbound::http::analytics::analytics,
        crate::inbound::http::peer::cross_service_test,
        crate::inbound::http::peer::batch_process,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RawUser,
        AgeCategory,
        DerivedFields,
        ProcessingMetadata,
        DerivedRecord,
        ProcessingStats,
        AggregateSummary,
        HealthProbe,
        UsersProbe,
        PeerProbes,
        CrossServiceReport,
        BatchOutcome,
        ProcessUserResponse,
        DeleteResponse,
        ServiceBanner,
        HealthStatus,
    )),
    tags(
        (name = "health", description = "Service banner and health"),
        (name = "processed-users", description = "Derive, fetch and delete processed user records"),
        (name = "analytics", description = "Aggregate statistics across processed users"),
        (name = "peer", description = "Diagnostics and batch operations against the peer service")
    )
)]
pub struct ApiDoc;

//! Service banner and health endpoint.
//!
//! ```text
//! GET /
//! GET /health
//! ```

use actix_web::{get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name this service reports about itself.
pub const SERVICE_NAME: &str = "service2";

/// Response body for `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceBanner {
    #[schema(example = "Data Processing Service is running")]
    pub message: String,
    #[schema(example = "service2")]
    pub service: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "service2")]
    pub service: String,
}

/// Identify the running service.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service banner", body = ServiceBanner)),
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<ServiceBanner> {
    web::Json(ServiceBanner {
        message: "Data Processing Service is running".to_owned(),
        service: SERVICE_NAME.to_owned(),
    })
}

/// Static health probe. Always reports healthy while the process serves.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service is healthy", body = HealthStatus)),
    operation_id = "health"
)]
#[get("/health")]
pub async fn health() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthStatus {
            status: crate::domain::SELF_STATUS.to_owned(),
            service: SERVICE_NAME.to_owned(),
        })
}

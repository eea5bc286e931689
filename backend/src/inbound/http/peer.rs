//! Handlers that talk to the peer service on behalf of the caller.
//!
//! ```text
//! GET /cross-service-test
//! POST /batch-process
//! ```

use actix_web::{get, post, web};

use crate::domain::{BatchOutcome, CrossServiceReport, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Probe the peer service and report the outcome of each probe.
#[utoipa::path(
    get,
    path = "/cross-service-test",
    responses((status = 200, description = "Diagnostic report", body = CrossServiceReport)),
    tags = ["peer"],
    operation_id = "crossServiceTest"
)]
#[get("/cross-service-test")]
pub async fn cross_service_test(state: web::Data<HttpState>) -> web::Json<CrossServiceReport> {
    web::Json(state.peer.cross_service_test().await)
}

/// Ask the peer to re-process every user it holds.
#[utoipa::path(
    post,
    path = "/batch-process",
    responses(
        (status = 200, description = "Batch completed", body = BatchOutcome),
        (status = 500, description = "Peer listing failed", body = Error)
    ),
    tags = ["peer"],
    operation_id = "batchProcess"
)]
#[post("/batch-process")]
pub async fn batch_process(state: web::Data<HttpState>) -> ApiResult<web::Json<BatchOutcome>> {
    let outcome = state.peer.batch_process().await?;
    Ok(web::Json(outcome))
}

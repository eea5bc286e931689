//! Analytics handler.
//!
//! ```text
//! GET /analytics
//! ```

use actix_web::{get, web};

use crate::domain::AggregateSummary;
use crate::inbound::http::state::HttpState;

/// Aggregate statistics across every stored record.
///
/// Always answers 200. Peer failures degrade to category estimates and an
/// unreadable store reports the empty summary.
#[utoipa::path(
    get,
    path = "/analytics",
    responses((status = 200, description = "Aggregate summary", body = AggregateSummary)),
    tags = ["analytics"],
    operation_id = "analytics"
)]
#[get("/analytics")]
pub async fn analytics(state: web::Data<HttpState>) -> web::Json<AggregateSummary> {
    web::Json(state.analytics.summarize().await)
}

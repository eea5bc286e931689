//! HTTP inbound adapter exposing REST endpoints.

pub mod analytics;
pub mod error;
pub mod health;
pub mod peer;
pub mod processed_users;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every route and extractor configuration on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use dataproc::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .service(health::root)
        .service(health::health)
        .service(processed_users::process_user)
        .service(processed_users::list_processed_users)
        .service(processed_users::get_processed_user)
        .service(processed_users::delete_processed_user)
        .service(analytics::analytics)
        .service(peer::cross_service_test)
        .service(peer::batch_process);
}

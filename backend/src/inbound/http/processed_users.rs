//! Processed user handlers.
//!
//! ```text
//! POST /process-user {"id":7,"name":"Ada","email":"ada@example.com","age":36}
//! GET /processed-users/7
//! GET /processed-users
//! DELETE /processed-users/7
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DerivedRecord, Error, RawUser, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response body for `POST /process-user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessUserResponse {
    #[schema(example = "User processed successfully")]
    pub message: String,
    pub user_id: UserId,
}

/// Response body for `DELETE /processed-users/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Processed data for user 7 deleted successfully")]
    pub message: String,
}

/// Identifiers that can never be stored resolve to the usual 404.
fn stored_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::not_found("Processed user data not found").with_details(json!({ "userId": raw }))
    })
}

/// Derive and store a record for one raw user.
///
/// Reprocessing an existing id overwrites the previous record.
#[utoipa::path(
    post,
    path = "/process-user",
    request_body = RawUser,
    responses(
        (status = 200, description = "User processed", body = ProcessUserResponse),
        (status = 400, description = "Missing user id", body = Error),
        (status = 422, description = "Malformed body", body = Error)
    ),
    tags = ["processed-users"],
    operation_id = "processUser"
)]
#[post("/process-user")]
pub async fn process_user(
    state: web::Data<HttpState>,
    payload: web::Json<RawUser>,
) -> ApiResult<web::Json<ProcessUserResponse>> {
    let user_id = state
        .processed_users
        .process_user(payload.into_inner())
        .await?;
    Ok(web::Json(ProcessUserResponse {
        message: "User processed successfully".to_owned(),
        user_id,
    }))
}

/// Fetch the derived record for one user.
#[utoipa::path(
    get,
    path = "/processed-users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Derived record", body = DerivedRecord),
        (status = 422, description = "Non-numeric identifier", body = Error),
        (status = 404, description = "No record stored", body = Error)
    ),
    tags = ["processed-users"],
    operation_id = "getProcessedUser"
)]
#[get("/processed-users/{user_id}")]
pub async fn get_processed_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DerivedRecord>> {
    let user_id = stored_user_id(path.into_inner())?;
    let record = state.processed_users_query.get(user_id).await?;
    Ok(web::Json(record))
}

/// List every derived record in first-insertion order.
#[utoipa::path(
    get,
    path = "/processed-users",
    responses(
        (status = 200, description = "All derived records", body = [DerivedRecord])
    ),
    tags = ["processed-users"],
    operation_id = "listProcessedUsers"
)]
#[get("/processed-users")]
pub async fn list_processed_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DerivedRecord>>> {
    let records = state.processed_users_query.list().await?;
    Ok(web::Json(records))
}

/// Remove the derived record for one user.
#[utoipa::path(
    delete,
    path = "/processed-users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Record removed", body = DeleteResponse),
        (status = 422, description = "Non-numeric identifier", body = Error),
        (status = 404, description = "No record stored", body = Error)
    ),
    tags = ["processed-users"],
    operation_id = "deleteProcessedUser"
)]
#[delete("/processed-users/{user_id}")]
pub async fn delete_processed_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let user_id = stored_user_id(path.into_inner())?;
    state.processed_users.delete(user_id).await?;
    Ok(web::Json(DeleteResponse {
        message: format!("Processed data for user {user_id} deleted successfully"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPeerService;
    use crate::inbound::http::test_utils::{test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn ada(id: i64) -> Value {
        json!({"id": id, "name": "Ada", "email": "ada@example.com", "age": 36})
    }

    #[actix_web::test]
    async fn process_then_fetch_returns_derived_record() {
        let app = actix_test::init_service(test_app(test_state(MockPeerService::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/process-user")
                .set_json(ada(7))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({"message": "User processed successfully", "user_id": 7})
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/processed-users/7")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let record: Value = actix_test::read_body_json(response).await;
        assert_eq!(record["user_id"], 7);
        assert_eq!(
            record["processed_data"],
            json!({
                "name_length": 3,
                "email_domain": "example.com",
                "age_category": "middle",
                "name_uppercase": "ADA",
                "email_uppercase": "ADA@EXAMPLE.COM",
                "age_squared": 1296,
                "is_adult": true
            })
        );
        assert_eq!(
            record["analytics"],
            json!({
                "processing_time_ms": 150,
                "data_quality_score": 0.95,
                "confidence_level": 0.88
            })
        );
    }

    #[rstest]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "age": 36}))]
    #[case(json!({"id": null, "name": "Ada", "email": "ada@example.com", "age": 36}))]
    #[case(json!({"id": 0, "name": "Ada", "email": "ada@example.com", "age": 36}))]
    #[actix_web::test]
    async fn process_user_requires_an_id(#[case] payload: Value) {
        let app = actix_test::init_service(test_app(test_state(MockPeerService::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/process-user")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], "User ID is required");
    }

    #[rstest]
    #[case("/processed-users/42")]
    #[case("/processed-users/0")]
    #[actix_web::test]
    async fn unknown_user_is_not_found(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(test_state(MockPeerService::new()))).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Processed user data not found");
    }

    #[actix_web::test]
    async fn delete_removes_record_and_second_delete_is_not_found() {
        let app = actix_test::init_service(test_app(test_state(MockPeerService::new()))).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/process-user")
                .set_json(ada(9))
                .to_request(),
        )
        .await;

        let delete = || {
            actix_test::TestRequest::delete()
                .uri("/processed-users/9")
                .to_request()
        };
        let first = actix_test::call_service(&app, delete()).await;
        assert_eq!(first.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(first).await;
        assert_eq!(
            body,
            json!({"message": "Processed data for user 9 deleted successfully"})
        );

        let second = actix_test::call_service(&app, delete()).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_preserves_first_insertion_order_across_overwrites() {
        let app = actix_test::init_service(test_app(test_state(MockPeerService::new()))).await;
        for id in [3, 1, 2, 3] {
            actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/process-user")
                    .set_json(ada(id))
                    .to_request(),
            )
            .await;
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/processed-users")
                .to_request(),
        )
        .await;

        let records: Vec<Value> = actix_test::read_body_json(response).await;
        let ids: Vec<i64> = records
            .iter()
            .filter_map(|record| record["user_id"].as_i64())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}

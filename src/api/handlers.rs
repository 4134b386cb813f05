//! HTTP request handlers for the rotation engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::checked_week_span;

use super::request::{
    CoverageQuery, DecisionBody, FairnessQuery, ScheduleQuery, SwapListQuery, SwapRequestBody,
};
use super::response::{
    ApiError, ApiErrorResponse, CoverageResponse, ScheduleResponse, SwapListResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", get(schedule_handler))
        .route("/coverage", get(coverage_handler))
        .route("/fairness", get(fairness_handler))
        .route("/swaps", get(list_swaps_handler).post(request_swap_handler))
        .route("/swaps/:id/decision", post(decide_swap_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn query_error(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
        body_text,
    )))
}

fn json_error(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

/// Handler for GET /schedule.
///
/// Returns the fully resolved weeks starting with the week of `start`.
async fn schedule_handler(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        start = %query.start,
        weeks = query.weeks,
        "Processing schedule request"
    );

    let start_time = Instant::now();
    let engine = state.engine();
    let schedule = match engine.weeks(query.start, query.weeks) {
        Ok(schedule) => schedule,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Schedule request rejected");
            return error_response(err.into());
        }
    };
    let rows = crate::calculation::schedule_rows(&schedule);
    info!(
        correlation_id = %correlation_id,
        weeks = schedule.len(),
        rows = rows.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Schedule generated"
    );

    json_response(
        StatusCode::OK,
        ScheduleResponse {
            start: checked_week_span(query.start, 1).map_or(query.start, |(monday, _)| monday),
            weeks: schedule.len(),
            schedule,
            rows,
        },
    )
}

/// Handler for GET /coverage.
async fn coverage_handler(
    State(state): State<AppState>,
    query: Result<Query<CoverageQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };
    let end = query.end.unwrap_or(query.start);
    if end < query.start {
        warn!(correlation_id = %correlation_id, start = %query.start, end = %end, "Reversed coverage range");
        return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
            "end must not precede start",
        )));
    }
    info!(correlation_id = %correlation_id, start = %query.start, end = %end, "Processing coverage request");

    match state.engine().coverage(query.start, end) {
        Ok(coverage) => json_response(StatusCode::OK, CoverageResponse { coverage }),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Coverage request rejected");
            error_response(err.into())
        }
    }
}

/// Handler for GET /fairness.
async fn fairness_handler(
    State(state): State<AppState>,
    query: Result<Query<FairnessQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, start = %query.start, weeks = query.weeks, "Processing fairness request");

    match state.engine().fairness_report(query.start, query.weeks) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Fairness request rejected");
            error_response(err.into())
        }
    }
}

/// Handler for GET /swaps.
async fn list_swaps_handler(
    State(state): State<AppState>,
    query: Result<Query<SwapListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };
    let swaps = state.engine().list_swaps(query.status);
    info!(correlation_id = %correlation_id, count = swaps.len(), "Listed swaps");
    json_response(StatusCode::OK, SwapListResponse { swaps })
}

/// Handler for POST /swaps.
///
/// Validates and records a pending swap request.
async fn request_swap_handler(
    State(state): State<AppState>,
    payload: Result<Json<SwapRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_error(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        requester = %body.requester,
        target = %body.target,
        date = %body.date,
        "Processing swap request"
    );

    let today = state.today();
    match state.engine().request_swap_as_of(body.into(), today) {
        Ok(swap) => {
            info!(correlation_id = %correlation_id, swap_id = %swap.id, "Swap request recorded");
            json_response(StatusCode::CREATED, swap)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Swap request rejected");
            error_response(err.into())
        }
    }
}

/// Handler for POST /swaps/:id/decision.
///
/// The approver is taken from the body as given. See [`DecisionBody`] for
/// who is responsible for establishing that identity.
async fn decide_swap_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<DecisionBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Invalid swap id");
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                body_text,
            )));
        }
    };
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_error(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        swap_id = %id,
        approver = %body.approver.username,
        decision = ?body.decision,
        "Processing swap decision"
    );

    match state
        .engine()
        .decide_swap(id, &body.approver, body.decision)
    {
        Ok(swap) => json_response(StatusCode::OK, swap),
        Err(err) => {
            warn!(correlation_id = %correlation_id, swap_id = %id, error = %err, "Swap decision failed");
            error_response(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TeamConfig;
    use crate::engine::RotationEngine;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let engine = RotationEngine::new(TeamConfig::default_team());
        AppState::new(engine).with_today(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_schedule_returns_rows_for_each_day() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/schedule?start=2024-03-06&weeks=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let json = body_json(response).await;
        assert_eq!(json["start"], "2024-03-04");
        assert_eq!(json["weeks"], 2);
        assert_eq!(json["rows"].as_array().unwrap().len(), 60);
    }

    #[tokio::test]
    async fn test_schedule_rejects_bad_date() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/schedule?start=not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_coverage_for_single_tuesday() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/coverage?start=2024-03-05")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["coverage"]["2024-03-05"]["count"], 6);
    }

    #[tokio::test]
    async fn test_coverage_rejects_reversed_range() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/coverage?start=2024-03-08&end=2024-03-04")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_coverage_beyond_maximum_range_is_bad_request() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/coverage?start=2024-01-01&end=2026-06-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_DATE");
    }

    #[tokio::test]
    async fn test_conflicting_approval_is_unprocessable() {
        let state = create_test_state();
        let mut ids = Vec::new();
        for target in ["Blake", "Fiona"] {
            let response = create_router(state.clone())
                .oneshot(post_json(
                    "/swaps",
                    &format!(
                        r#"{{"requester":"Alex","target":"{}","date":"2024-03-06"}}"#,
                        target
                    ),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            let created = body_json(response).await;
            ids.push(created["id"].as_str().unwrap().to_string());
        }

        let approve = r#"{"approver":{"username":"morgan","role":"manager"},"decision":"approve"}"#;
        let response = create_router(state.clone())
            .oneshot(post_json(&format!("/swaps/{}/decision", ids[0]), approve))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router(state)
            .oneshot(post_json(&format!("/swaps/{}/decision", ids[1]), approve))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "SAME_SCHEDULE");
    }

    #[tokio::test]
    async fn test_swap_request_then_approval() {
        let state = create_test_state();

        let response = create_router(state.clone())
            .oneshot(post_json(
                "/swaps",
                r#"{"requester":"Alex","target":"Blake","date":"2024-03-06","reason":"dentist"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["status"], "pending");
        let id = created["id"].as_str().unwrap().to_string();

        let response = create_router(state.clone())
            .oneshot(post_json(
                &format!("/swaps/{}/decision", id),
                r#"{"approver":{"username":"morgan","role":"manager"},"decision":"approve"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let decided = body_json(response).await;
        assert_eq!(decided["status"], "approved");
        assert_eq!(decided["approver"], "morgan");

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/swaps?status=approved")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["swaps"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tuesday_swap_is_unprocessable() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json(
                "/swaps",
                r#"{"requester":"Alex","target":"Blake","date":"2024-03-05"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "REQUIRED_DAY_VIOLATION");
    }

    #[tokio::test]
    async fn test_unknown_engineer_is_bad_request() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json(
                "/swaps",
                r#"{"requester":"Zed","target":"Blake","date":"2024-03-06"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNKNOWN_ENGINEER");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/swaps", "{ not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/swaps", r#"{"requester":"Alex","date":"2024-03-06"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_decision_on_unknown_id_is_not_found() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json(
                &format!("/swaps/{}/decision", Uuid::new_v4()),
                r#"{"approver":{"username":"root","role":"admin"},"decision":"reject"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_engineer_role_cannot_decide() {
        let state = create_test_state();
        let response = create_router(state.clone())
            .oneshot(post_json(
                "/swaps",
                r#"{"requester":"Alex","target":"Blake","date":"2024-03-06"}"#,
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = create_router(state)
            .oneshot(post_json(
                &format!("/swaps/{}/decision", id),
                r#"{"approver":{"username":"blake","role":"engineer"},"decision":"approve"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_fairness_report_lists_every_engineer() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/fairness?start=2024-01-01&weeks=8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["engineers"].as_array().unwrap().len(), 6);
    }
}

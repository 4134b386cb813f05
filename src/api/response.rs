//! Response types for the rotation engine API.
//!
//! This module defines the JSON response bodies and the mapping from
//! [`EngineError`] kinds to HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DailyCoverage, ScheduledDay, SwapRequest, WeekSchedule};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error for a bad query or body.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying a validation error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
            EngineError::UnknownEngineer { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_ENGINEER"),
            EngineError::RequiredDayViolation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "REQUIRED_DAY_VIOLATION")
            }
            EngineError::SameSchedule { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "SAME_SCHEDULE"),
            EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            EngineError::AlreadyDecided { .. } => (StatusCode::CONFLICT, "ALREADY_DECIDED"),
            EngineError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            EngineError::ConfigInvalid { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        let error = match error {
            EngineError::RequiredDayViolation { .. } => ApiError::with_details(
                code,
                message,
                "Tuesday is the required day; swaps are only allowed when it is an observed holiday",
            ),
            EngineError::SameSchedule { .. } => ApiError::with_details(
                code,
                message,
                "A swap must exchange an engineer who is working with one who is off",
            ),
            _ => ApiError::new(code, message),
        };

        ApiErrorResponse { status, error }
    }
}

/// Response body for `GET /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Monday of the first returned week.
    pub start: NaiveDate,
    /// Number of weeks returned.
    pub weeks: usize,
    /// Resolved weeks, including hour totals and adjustment trails.
    pub schedule: Vec<WeekSchedule>,
    /// Flat (date, engineer, assignment) rows.
    pub rows: Vec<ScheduledDay>,
}

/// Response body for `GET /coverage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResponse {
    /// Coverage per workday in the requested range.
    pub coverage: BTreeMap<NaiveDate, DailyCoverage>,
}

/// Response body for `GET /swaps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapListResponse {
    /// Swap requests in creation order.
    pub swaps: Vec<SwapRequest>,
}

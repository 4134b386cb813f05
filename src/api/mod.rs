//! HTTP API module for the rotation engine.
//!
//! This module exposes schedule generation, coverage, fairness and the swap
//! workflow as JSON endpoints and maps engine errors to HTTP statuses.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CoverageQuery, DecisionBody, FairnessQuery, ScheduleQuery, SwapListQuery, SwapRequestBody,
};
pub use response::{
    ApiError, ApiErrorResponse, CoverageResponse, ScheduleResponse, SwapListResponse,
};
pub use state::AppState;

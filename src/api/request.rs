//! Request types for the rotation engine API.
//!
//! This module defines the query strings and JSON bodies accepted by the
//! schedule, coverage and swap endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::SwapSubmission;
use crate::models::{Approver, Decision, SwapStatus};

/// Query for `GET /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// Any date in the first week.
    pub start: NaiveDate,
    /// Number of weeks, default 1.
    #[serde(default = "default_weeks")]
    pub weeks: u32,
}

fn default_weeks() -> u32 {
    1
}

/// Query for `GET /coverage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageQuery {
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive. Defaults to `start`.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Query for `GET /fairness`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessQuery {
    /// Any date in the first week.
    pub start: NaiveDate,
    /// Number of weeks to analyse, default 8.
    #[serde(default = "default_fairness_weeks")]
    pub weeks: u32,
}

fn default_fairness_weeks() -> u32 {
    8
}

/// Query for `GET /swaps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapListQuery {
    /// Optional status filter.
    #[serde(default)]
    pub status: Option<SwapStatus>,
}

/// Body for `POST /swaps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequestBody {
    /// The engineer asking for the swap.
    pub requester: String,
    /// The engineer to swap with.
    pub target: String,
    /// The date to swap.
    pub date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl From<SwapRequestBody> for SwapSubmission {
    fn from(body: SwapRequestBody) -> Self {
        SwapSubmission {
            requester: body.requester,
            target: body.target,
            date: body.date,
            reason: body.reason,
        }
    }
}

/// Body for `POST /swaps/:id/decision`.
///
/// The router does no authentication: `approver` is used exactly as sent,
/// and the approval policy only sees what the caller claims. A binary that
/// exposes this router must establish the approver through its own auth
/// layer and overwrite `approver` with that identity before the decision
/// reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionBody {
    /// The user making the decision.
    pub approver: Approver,
    /// Approve or reject.
    pub decision: Decision,
}

//! Swap request records and approver identities.
//!
//! The field names of [`SwapRequest`] are the stable persisted schema: an
//! external store serializes these records, so renaming a field is a breaking
//! change for existing ledgers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a swap request.
///
/// `Pending` transitions exactly once to `Approved` or `Rejected`; both are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; applied as an overlay on its date.
    Approved,
    /// Rejected; has no schedule effect.
    Rejected,
}

impl SwapStatus {
    /// Returns true for `Approved` and `Rejected`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SwapStatus::Pending)
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapStatus::Pending => write!(f, "pending"),
            SwapStatus::Approved => write!(f, "approved"),
            SwapStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for SwapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SwapStatus::Pending),
            "approved" => Ok(SwapStatus::Approved),
            "rejected" => Ok(SwapStatus::Rejected),
            _ => Err(format!("Invalid swap status: {}", s)),
        }
    }
}

/// A request to exchange presence between two engineers on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Generated identifier.
    pub id: Uuid,
    /// The engineer asking for the swap.
    pub requester: String,
    /// The engineer the requester swaps with.
    pub target: String,
    /// The single date the swap applies to.
    pub date: NaiveDate,
    /// Free-text reason supplied by the requester.
    pub reason: String,
    /// Current lifecycle status.
    pub status: SwapStatus,
    /// Username of the approver, set when decided.
    pub approver: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was decided.
    pub decided_at: Option<DateTime<Utc>>,
}

impl SwapRequest {
    /// Creates a new pending request.
    pub fn pending(requester: &str, target: &str, date: NaiveDate, reason: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester: requester.to_string(),
            target: target.to_string(),
            date,
            reason: reason.to_string(),
            status: SwapStatus::Pending,
            approver: None,
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    /// Returns true if `name` is the requester or the target.
    pub fn involves(&self, name: &str) -> bool {
        self.requester == name || self.target == name
    }
}

/// The outcome chosen by an approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Approve the swap.
    Approve,
    /// Reject the swap.
    Reject,
}

impl Decision {
    /// The status a pending request moves to under this decision.
    pub fn status(self) -> SwapStatus {
        match self {
            Decision::Approve => SwapStatus::Approved,
            Decision::Reject => SwapStatus::Rejected,
        }
    }
}

/// Application role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// May approve and reject swaps.
    Manager,
    /// May request swaps.
    Engineer,
}

/// The user making a swap decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approver {
    /// Login name recorded on the decided request.
    pub username: String,
    /// The user's role.
    pub role: Role,
}

impl Approver {
    /// Creates a new approver.
    pub fn new(username: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pending_request_has_no_decision_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let swap = SwapRequest::pending("Alex", "Blake", date, "dentist");
        assert_eq!(swap.status, SwapStatus::Pending);
        assert!(swap.approver.is_none());
        assert!(swap.decided_at.is_none());
        assert!(swap.involves("Blake"));
        assert!(!swap.involves("Casey"));
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(SwapStatus::from_str("Approved").unwrap(), SwapStatus::Approved);
        assert!(SwapStatus::from_str("reopened").is_err());
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(SwapStatus::Approved.is_terminal());
        assert!(SwapStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_persisted_schema_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let swap = SwapRequest::pending("Alex", "Blake", date, "dentist");
        let value = serde_json::to_value(&swap).unwrap();
        for field in [
            "id",
            "requester",
            "target",
            "date",
            "reason",
            "status",
            "approver",
            "created_at",
            "decided_at",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["status"], "pending");
        assert_eq!(value["date"], "2024-03-06");
    }
}

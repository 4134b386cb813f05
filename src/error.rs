//! Error types for the rotation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every validation failure the engine can report. None of these are
//! transient: the engine performs no I/O apart from the optional ledger
//! store, so retrying an operation with the same inputs yields the same error.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the rotation engine.
///
/// All operations in the engine return this error type, making it easy
/// to map each kind to a user-facing status at the transport boundary.
///
/// # Example
///
/// ```
/// use rotation_engine::error::EngineError;
///
/// let error = EngineError::UnknownEngineer {
///     name: "Zed".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown engineer: Zed");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The date is not a schedulable weekday inside the configured horizon.
    #[error("Invalid date {date}: {message}")]
    InvalidDate {
        /// The rejected date.
        date: NaiveDate,
        /// Why the date was rejected.
        message: String,
    },

    /// A swap targeted the required day (Tuesday) without a holiday substitution.
    #[error("{date} is a required day and cannot be swapped")]
    RequiredDayViolation {
        /// The required day that was targeted.
        date: NaiveDate,
    },

    /// A swap did not exchange a working engineer with an engineer who is off.
    #[error("{requester} and {target} have the same schedule on {date}: {message}")]
    SameSchedule {
        /// The engineer requesting the swap.
        requester: String,
        /// The engineer asked to swap.
        target: String,
        /// The date of the requested swap.
        date: NaiveDate,
        /// A description of the shared state.
        message: String,
    },

    /// A name was not found in the team roster.
    #[error("Unknown engineer: {name}")]
    UnknownEngineer {
        /// The name that was not found.
        name: String,
    },

    /// No swap request exists with the given id.
    #[error("Swap request not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// The swap request has already been approved or rejected.
    #[error("Swap request {id} was already {status}")]
    AlreadyDecided {
        /// The id of the decided request.
        id: Uuid,
        /// The terminal status it holds.
        status: String,
    },

    /// The approver lacks manager or admin capability.
    #[error("{username} is not allowed to decide swap requests")]
    Forbidden {
        /// The user who attempted the decision.
        username: String,
    },

    /// The team configuration violates a structural invariant.
    #[error("Invalid team configuration: {message}")]
    ConfigInvalid {
        /// A description of the violated invariant.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The swap store failed to load or persist ledger records.
    #[error("Swap store error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_displays_date_and_message() {
        let error = EngineError::InvalidDate {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            message: "weekends are not scheduled".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date 2024-03-09: weekends are not scheduled"
        );
    }

    #[test]
    fn test_required_day_violation_displays_date() {
        let error = EngineError::RequiredDayViolation {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "2024-03-05 is a required day and cannot be swapped"
        );
    }

    #[test]
    fn test_same_schedule_displays_both_engineers() {
        let error = EngineError::SameSchedule {
            requester: "Alex".to_string(),
            target: "Blake".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            message: "both are working".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Alex and Blake have the same schedule on 2024-03-06: both are working"
        );
    }

    #[test]
    fn test_already_decided_displays_status() {
        let id = Uuid::nil();
        let error = EngineError::AlreadyDecided {
            id,
            status: "approved".to_string(),
        };
        assert_eq!(
            error.to_string(),
            format!("Swap request {} was already approved", id)
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/team.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/team.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_forbidden() -> EngineResult<()> {
            Err(EngineError::Forbidden {
                username: "alex".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_forbidden()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::Forbidden { .. })
        ));
    }
}

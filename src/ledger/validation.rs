//! Swap request validation.
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. `InvalidDate`: weekend dates, or dates outside the scheduling horizon
//!    measured from the Monday of the current week.
//! 2. `UnknownEngineer`: requester, then target.
//! 3. `RequiredDayViolation`: the required day, unless it is an observed
//!    holiday in the requester's or the target's region.
//! 4. `SameSchedule`: after rotation, on-call and already-approved swaps,
//!    exactly one of the two must be working. The same check runs again
//!    when a request is approved.

use chrono::{Datelike, Duration, NaiveDate};

use crate::calculation::{
    checked_week_span, is_required_day, is_workday, presence_pair, resolve_presence,
};
use crate::config::{SchedulingHorizon, TeamConfig};
use crate::error::{EngineError, EngineResult};
use crate::holidays::HolidayProvider;
use crate::models::SwapRequest;

/// Returns the inclusive range of dates swap requests may target.
///
/// Bounds that fall outside the representable calendar saturate at
/// [`NaiveDate::MIN`] and [`NaiveDate::MAX`].
///
/// # Example
///
/// ```
/// use rotation_engine::config::SchedulingHorizon;
/// use rotation_engine::ledger::horizon_bounds;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// let horizon = SchedulingHorizon { weeks_back: 1, weeks_forward: 2 };
/// let (earliest, latest) = horizon_bounds(horizon, today);
/// assert_eq!(earliest, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
/// assert_eq!(latest, NaiveDate::from_ymd_opt(2024, 3, 24).unwrap());
/// ```
pub fn horizon_bounds(horizon: SchedulingHorizon, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let current = today.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
    let earliest = current
        .checked_sub_signed(Duration::weeks(i64::from(horizon.weeks_back)))
        .unwrap_or(NaiveDate::MIN);
    let forward = Duration::weeks(i64::from(horizon.weeks_forward) + 1) - Duration::days(1);
    let latest = current
        .checked_add_signed(forward)
        .unwrap_or(NaiveDate::MAX);
    (earliest, latest)
}

/// Validates a prospective swap against the current approved swaps.
///
/// `approved` may contain swaps of any status; only approved ones are
/// overlaid, in slice order.
pub fn validate_swap(
    config: &TeamConfig,
    holidays: &dyn HolidayProvider,
    approved: &[SwapRequest],
    requester: &str,
    target: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> EngineResult<()> {
    if !is_workday(date) {
        return Err(EngineError::InvalidDate {
            date,
            message: "weekends are not scheduled".to_string(),
        });
    }
    let (earliest, latest) = horizon_bounds(config.horizon(), today);
    if date < earliest || date > latest {
        return Err(EngineError::InvalidDate {
            date,
            message: format!(
                "outside the scheduling horizon {} to {}",
                earliest, latest
            ),
        });
    }
    if checked_week_span(date, 1).is_none() {
        return Err(EngineError::InvalidDate {
            date,
            message: "week falls outside the supported calendar".to_string(),
        });
    }

    let requester_engineer = config
        .engineer(requester)
        .ok_or_else(|| EngineError::UnknownEngineer {
            name: requester.to_string(),
        })?;
    let target_engineer = config
        .engineer(target)
        .ok_or_else(|| EngineError::UnknownEngineer {
            name: target.to_string(),
        })?;

    if is_required_day(date) {
        let observed = [requester_engineer, target_engineer]
            .iter()
            .any(|e| holidays.holidays(&e.region(), date.year()).is_holiday(date));
        if !observed {
            return Err(EngineError::RequiredDayViolation { date });
        }
    }

    check_exchange(config, approved, requester, target, date)
}

/// Checks that exactly one of `requester` and `target` works on `date`
/// once rotation, on-call and the approved swaps in `approved` are applied.
pub(crate) fn check_exchange(
    config: &TeamConfig,
    approved: &[SwapRequest],
    requester: &str,
    target: &str,
    date: NaiveDate,
) -> EngineResult<()> {
    let same_schedule = |message: &str| EngineError::SameSchedule {
        requester: requester.to_string(),
        target: target.to_string(),
        date,
        message: message.to_string(),
    };

    if requester == target {
        return Err(same_schedule("requester and target are the same engineer"));
    }

    let week = resolve_presence(config, date, approved);
    match presence_pair(&week, requester, target, date) {
        Some((true, false)) | Some((false, true)) => Ok(()),
        Some((true, true)) => Err(same_schedule("both are working")),
        Some((false, false)) => Err(same_schedule("both are off")),
        None => Err(same_schedule("no assignment found for this date")),
    }
}

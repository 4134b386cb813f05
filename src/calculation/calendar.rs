//! Calendar utilities.
//!
//! Pure date arithmetic used by every other stage of the pipeline: Monday
//! week boundaries, the Monday–Friday workweek, and the week index relative
//! to the rotation anchor.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The weekday every engineer works unless it is an observed holiday.
pub const REQUIRED_DAY: Weekday = Weekday::Tue;

/// The weekdays that can be assigned as a rotation day off, in rotation order.
pub const FLEX_DAYS: [Weekday; 4] = [Weekday::Mon, Weekday::Wed, Weekday::Thu, Weekday::Fri];

/// Number of scheduled days in a week (Monday–Friday).
pub const WORKWEEK_DAYS: usize = 5;

/// Returns the Monday of the week containing `date`.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::week_start;
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
///
/// # Panics
///
/// Panics if that Monday precedes [`NaiveDate::MIN`]. Unvalidated input
/// should go through [`checked_week_span`] first.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Returns the Monday of `start`'s week and the Friday of the week
/// `weeks - 1` weeks later, or `None` if either is not a representable date.
///
/// A `weeks` of zero is treated as one week.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::checked_week_span;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// let (first, last) = checked_week_span(start, 2).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
///
/// assert!(checked_week_span(NaiveDate::MAX, 1).is_none());
/// ```
pub fn checked_week_span(start: NaiveDate, weeks: u32) -> Option<(NaiveDate, NaiveDate)> {
    let back = Duration::days(i64::from(start.weekday().num_days_from_monday()));
    let first = start.checked_sub_signed(back)?;
    let forward = Duration::weeks(i64::from(weeks.max(1)) - 1) + Duration::days(4);
    let last = first.checked_add_signed(forward)?;
    Some((first, last))
}

/// Returns Monday through Friday of the week containing `date`.
///
/// Panics under the same conditions as [`week_start`], or if that Friday
/// lies past [`NaiveDate::MAX`].
pub fn workweek_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(date);
    (0..WORKWEEK_DAYS as i64)
        .map(|offset| monday + Duration::days(offset))
        .collect()
}

/// Returns the number of whole weeks between the anchor's week and the
/// week containing `date`.
///
/// Uses floor division, so weeks before the anchor have negative indices
/// and every date maps to exactly one week.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::week_index;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(); // a Wednesday
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(week_index(anchor, date), 2);
///
/// let before = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(); // Sunday before
/// assert_eq!(week_index(anchor, before), -1);
/// ```
pub fn week_index(anchor: NaiveDate, date: NaiveDate) -> i64 {
    (week_start(date) - week_start(anchor)).num_days().div_euclid(7)
}

/// Returns true for Monday through Friday.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns true if `date` falls on the required day.
pub fn is_required_day(date: NaiveDate) -> bool {
    date.weekday() == REQUIRED_DAY
}

/// Position of `date` within its workweek (0 = Monday), or `None` on weekends.
pub fn workday_offset(date: NaiveDate) -> Option<usize> {
    if is_workday(date) {
        Some(date.weekday().num_days_from_monday() as usize)
    } else {
        None
    }
}

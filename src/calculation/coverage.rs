//! Coverage calculator.
//!
//! Counts, per date, the engineers whose resolved assignment is `working`.
//! It reads resolved weeks only and applies no business rules of its own.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DailyCoverage, WeekSchedule};

/// Returns coverage for each Monday–Friday date of a resolved week.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::{base_week, daily_coverage};
/// use rotation_engine::config::TeamConfig;
/// use chrono::NaiveDate;
///
/// let week = base_week(&TeamConfig::default_team(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// let coverage = daily_coverage(&week);
/// assert_eq!(coverage.len(), 5);
/// assert_eq!(coverage[1].count, 6); // Tuesday
/// ```
pub fn daily_coverage(week: &WeekSchedule) -> Vec<DailyCoverage> {
    week.dates()
        .into_iter()
        .enumerate()
        .map(|(offset, date)| {
            let present: Vec<String> = week
                .engineers
                .iter()
                .filter(|e| e.days.get(offset).is_some_and(|d| d.working))
                .map(|e| e.engineer.clone())
                .collect();
            DailyCoverage {
                date,
                count: present.len(),
                present,
            }
        })
        .collect()
}

/// Returns coverage keyed by date for every workday in `start..=end` found
/// in the supplied weeks.
pub fn coverage_between(
    weeks: &[WeekSchedule],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<NaiveDate, DailyCoverage> {
    weeks
        .iter()
        .flat_map(daily_coverage)
        .filter(|c| start <= c.date && c.date <= end)
        .map(|c| (c.date, c))
        .collect()
}

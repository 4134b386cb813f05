//! Rotation generator.
//!
//! Produces the base day-off assignment for every engineer in a week, before
//! on-call, swaps, holidays or PTO are applied. The assignment is a pure
//! function of the roster order, the rotation period and the anchor date.
//!
//! Weeks are grouped into rotation blocks of `rotation_period_weeks`. Within
//! a block each engineer keeps one flexible weekday off, chosen round-robin
//! over [`FLEX_DAYS`] by `(ordinal + block) mod 4`. The modulus is the number
//! of flexible weekdays, never the team size, so any roster of two or more
//! engineers yields a valid partition. When the team size is not a multiple
//! of four the lower roster ordinals land on the days with one extra absence.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::TeamConfig;
use crate::models::{DayAssignment, EngineerWeek, WeekSchedule, WeeklyHours};

use super::calendar::{FLEX_DAYS, is_required_day, week_index, week_start, workweek_dates};

/// Hours in a regular rotation workday.
pub const ROTATION_DAILY_HOURS: u32 = 10;

/// Base weekly hour requirement for every engineer.
pub const BASE_WEEKLY_HOURS: u32 = 40;

/// Returns the rotation block a week belongs to.
///
/// A zero period is treated as one week; validated configurations never
/// carry one.
pub fn rotation_block(week_index: i64, period_weeks: u32) -> i64 {
    week_index.div_euclid(i64::from(period_weeks.max(1)))
}

/// Returns the rotation day off for a roster position in a block.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::rotation_day_off;
/// use chrono::Weekday;
///
/// assert_eq!(rotation_day_off(0, 0), Weekday::Mon);
/// assert_eq!(rotation_day_off(1, 0), Weekday::Wed);
/// assert_eq!(rotation_day_off(0, 1), Weekday::Wed);
/// assert_eq!(rotation_day_off(3, 1), Weekday::Mon);
/// ```
pub fn rotation_day_off(ordinal: usize, block: i64) -> Weekday {
    let slots = FLEX_DAYS.len() as i64;
    let index = (ordinal as i64 + block).rem_euclid(slots);
    FLEX_DAYS[index as usize]
}

/// Builds the base week containing `date` for the whole team.
///
/// Every engineer works four 10-hour days with their rotation day off. No
/// on-call selection is made (`on_call` is `None`).
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::base_week;
/// use rotation_engine::config::TeamConfig;
/// use chrono::{NaiveDate, Weekday};
///
/// let config = TeamConfig::default_team();
/// let week = base_week(&config, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
///
/// assert_eq!(week.week_start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// assert_eq!(week.week_index, 9);
/// assert_eq!(week.engineer("Blake").unwrap().rotation_day_off, Weekday::Wed);
/// assert!(week.engineers.iter().all(|e| e.working_days() == 4));
/// ```
pub fn base_week(config: &TeamConfig, date: NaiveDate) -> WeekSchedule {
    let monday = week_start(date);
    let index = week_index(config.rotation_start(), monday);
    let block = rotation_block(index, config.rotation_period_weeks());
    let dates = workweek_dates(monday);

    let engineers = config
        .engineers()
        .iter()
        .enumerate()
        .map(|(ordinal, engineer)| {
            let day_off = rotation_day_off(ordinal, block);
            let days = dates
                .iter()
                .map(|d| {
                    let mut day = if d.weekday() == day_off {
                        DayAssignment::off()
                    } else {
                        DayAssignment::working(ROTATION_DAILY_HOURS)
                    };
                    day.is_required_day = is_required_day(*d);
                    day
                })
                .collect();

            EngineerWeek {
                engineer: engineer.name.clone(),
                letter: engineer.letter,
                rotation_day_off: day_off,
                on_call: false,
                days,
                hours: unadjusted_hours(),
            }
        })
        .collect();

    WeekSchedule {
        week_start: monday,
        week_index: index,
        on_call: None,
        engineers,
    }
}

fn unadjusted_hours() -> WeeklyHours {
    WeeklyHours {
        base: BASE_WEEKLY_HOURS,
        required: BASE_WEEKLY_HOURS,
        scheduled: BASE_WEEKLY_HOURS,
        ..WeeklyHours::default()
    }
}

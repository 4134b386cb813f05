//! Week resolution.
//!
//! Composes the pipeline stages into a fully resolved week:
//! rotation → on-call → approved swaps → holidays → PTO → hour distribution.
//!
//! Every function here is a pure function of its inputs. Weeks can be
//! resolved in any order and in parallel; resolving the same week twice
//! with the same inputs yields identical results.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::config::TeamConfig;
use crate::models::{HolidaySet, PtoRecord, Region, ScheduledDay, SwapRequest, WeekSchedule};

use super::calendar::checked_week_span;
use super::hour_adjustment::adjust_week_hours;
use super::on_call::apply_on_call;
use super::rotation::base_week;
use super::swap_overlay::apply_approved_swaps;

/// Holiday sets keyed by region.
pub type RegionHolidays = HashMap<Region, HolidaySet>;

/// The overlay lists a week is resolved against.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::{RegionHolidays, ScheduleInputs, resolve_week};
/// use rotation_engine::config::TeamConfig;
/// use chrono::NaiveDate;
///
/// let holidays = RegionHolidays::new();
/// let inputs = ScheduleInputs::new(&[], &[], &holidays);
/// let week = resolve_week(
///     &TeamConfig::default_team(),
///     NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
///     &inputs,
/// );
/// assert_eq!(week.on_call.as_deref(), Some("Dana"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleInputs<'a> {
    /// Swaps in decision order. Only approved entries are overlaid.
    pub swaps: &'a [SwapRequest],
    /// PTO records for any engineer.
    pub pto: &'a [PtoRecord],
    /// Holiday sets per region; regions without an entry observe none.
    pub holidays: &'a RegionHolidays,
}

impl<'a> ScheduleInputs<'a> {
    /// Bundles the overlay lists.
    pub fn new(
        swaps: &'a [SwapRequest],
        pto: &'a [PtoRecord],
        holidays: &'a RegionHolidays,
    ) -> Self {
        Self {
            swaps,
            pto,
            holidays,
        }
    }
}

/// Resolves presence only: rotation, on-call and approved swaps.
///
/// This is the view swap validation runs against. Holidays and PTO are not
/// applied and hours are left as the overlays set them.
pub fn resolve_presence(config: &TeamConfig, date: NaiveDate, swaps: &[SwapRequest]) -> WeekSchedule {
    let mut week = base_week(config, date);
    apply_on_call(config, &mut week);
    apply_approved_swaps(&mut week, swaps);
    week
}

/// Fully resolves the week containing `date`.
pub fn resolve_week(config: &TeamConfig, date: NaiveDate, inputs: &ScheduleInputs<'_>) -> WeekSchedule {
    let mut week = resolve_presence(config, date, inputs.swaps);
    let dates = week.dates();
    let no_holidays = HolidaySet::new();

    for (engineer, entry) in config.engineers().iter().zip(week.engineers.iter_mut()) {
        let holidays = inputs
            .holidays
            .get(&engineer.region())
            .unwrap_or(&no_holidays);
        adjust_week_hours(entry, &dates, holidays, inputs.pto);
    }
    week
}

/// Resolves `weeks` consecutive weeks starting with the week containing `start`.
///
/// Weeks whose workdays run past the end of the calendar are omitted.
pub fn resolve_weeks(
    config: &TeamConfig,
    start: NaiveDate,
    weeks: u32,
    inputs: &ScheduleInputs<'_>,
) -> Vec<WeekSchedule> {
    let Some((first, _)) = checked_week_span(start, 1) else {
        return Vec::new();
    };
    (0..i64::from(weeks))
        .map_while(|offset| {
            let monday = first.checked_add_signed(Duration::weeks(offset))?;
            checked_week_span(monday, 1).map(|_| monday)
        })
        .map(|monday| resolve_week(config, monday, inputs))
        .collect()
}

/// Flattens resolved weeks into date-ordered (date, engineer, assignment) rows.
pub fn schedule_rows(weeks: &[WeekSchedule]) -> Vec<ScheduledDay> {
    weeks.iter().flat_map(WeekSchedule::rows).collect()
}

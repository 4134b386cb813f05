//! Schedule derivation pipeline for the rotation engine.
//!
//! This module contains the pure functions that turn a team configuration
//! and its overlay lists into resolved weeks: calendar utilities, the
//! rotation generator, the on-call overlay, the swap overlay, the hour
//! adjuster, week resolution, the coverage calculator, and fairness
//! analytics. Nothing in here holds state or performs I/O.

mod analytics;
mod calendar;
mod coverage;
mod hour_adjustment;
mod on_call;
mod resolution;
mod rotation;
mod swap_overlay;

pub use analytics::{
    DayOffCounts, EngineerFairness, FairnessReport, SwapStatistics, fairness_report,
    swap_statistics,
};
pub use calendar::{
    FLEX_DAYS, REQUIRED_DAY, WORKWEEK_DAYS, checked_week_span, is_required_day, is_workday,
    week_index, week_start, workday_offset, workweek_dates,
};
pub use coverage::{coverage_between, daily_coverage};
pub use hour_adjustment::{ABSENCE_DEDUCTION_HOURS, adjust_week_hours, distribute_hours};
pub use on_call::{ON_CALL_DAILY_HOURS, apply_on_call, on_call_engineer};
pub use resolution::{
    RegionHolidays, ScheduleInputs, resolve_presence, resolve_week, resolve_weeks, schedule_rows,
};
pub use rotation::{
    BASE_WEEKLY_HOURS, ROTATION_DAILY_HOURS, base_week, rotation_block, rotation_day_off,
};
pub use swap_overlay::{SwapOverlay, apply_approved_swaps, apply_swap, presence_pair};

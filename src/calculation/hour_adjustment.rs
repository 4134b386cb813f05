//! Hour adjuster.
//!
//! Folds statutory holidays and PTO into one engineer's resolved week and
//! recomputes the hours placed on each remaining working day.
//!
//! Rules, applied in order:
//!
//! 1. The base requirement is 40 hours (4×10, or 5×8 in an on-call week).
//! 2. Each weekday holiday the engineer was scheduled to work marks the day
//!    absent and removes 8 hours. A holiday that falls on a day the engineer
//!    was already off is annotated but not deducted.
//! 3. Each PTO day the engineer was scheduled to work marks the day absent
//!    and removes 8 hours. PTO on the required day is flagged for approval
//!    instead: the day stays working and nothing is deducted.
//! 4. The requirement, floored at zero, is spread evenly across the remaining
//!    working days; the earliest days absorb any remainder. A day never
//!    carries more than its capacity (10 hours, or 8 on call) and any
//!    requirement that does not fit is reported as a shortfall.

use chrono::NaiveDate;

use crate::models::{AdjustmentRule, EngineerWeek, HolidaySet, HourAdjustment, PtoRecord};

use super::calendar::is_required_day;
use super::on_call::ON_CALL_DAILY_HOURS;
use super::rotation::{BASE_WEEKLY_HOURS, ROTATION_DAILY_HOURS};

/// Hours removed from the weekly requirement for each absent day.
pub const ABSENCE_DEDUCTION_HOURS: u32 = 8;

/// Splits `total` hours across `slots` days, earliest days first.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::distribute_hours;
///
/// assert_eq!(distribute_hours(40, 4), vec![10, 10, 10, 10]);
/// assert_eq!(distribute_hours(26, 3), vec![9, 9, 8]);
/// assert!(distribute_hours(8, 0).is_empty());
/// ```
pub fn distribute_hours(total: u32, slots: usize) -> Vec<u32> {
    if slots == 0 {
        return Vec::new();
    }
    let slots_u32 = slots as u32;
    let per_day = total / slots_u32;
    let remainder = (total % slots_u32) as usize;
    (0..slots)
        .map(|i| if i < remainder { per_day + 1 } else { per_day })
        .collect()
}

/// Applies holidays and PTO to one engineer's week and redistributes hours.
///
/// `dates` are the Monday–Friday dates of the week, aligned with
/// `week.days`. `pto` may hold records for any engineer; only the ones
/// naming this engineer are used.
pub fn adjust_week_hours(
    week: &mut EngineerWeek,
    dates: &[NaiveDate],
    holidays: &HolidaySet,
    pto: &[PtoRecord],
) {
    let mut adjustments = Vec::new();

    let holiday_deduction = apply_holidays(week, dates, holidays, &mut adjustments);
    let pto_deduction = apply_pto(week, dates, pto, &mut adjustments);

    let required = BASE_WEEKLY_HOURS.saturating_sub(holiday_deduction + pto_deduction);
    let capacity = if week.on_call {
        ON_CALL_DAILY_HOURS
    } else {
        ROTATION_DAILY_HOURS
    };

    let working: Vec<usize> = week
        .days
        .iter()
        .enumerate()
        .filter(|(_, d)| d.working)
        .map(|(i, _)| i)
        .collect();
    let max_placeable = capacity * working.len() as u32;

    let scheduled = required.min(max_placeable);
    let shortfall = required - scheduled;

    if required == 0 {
        adjustments.push(HourAdjustment {
            rule: AdjustmentRule::RequirementExhausted,
            date: None,
            hours_delta: 0,
            reasoning: format!(
                "Weekly requirement reduced to 0; {} remaining working day(s) carry 0 hours",
                working.len()
            ),
        });
    } else if shortfall > 0 {
        adjustments.push(HourAdjustment {
            rule: AdjustmentRule::CapacityCap,
            date: None,
            hours_delta: -(shortfall as i32),
            reasoning: format!(
                "{} required hours exceed {} day(s) at {} hours; {} hours not placed",
                required,
                working.len(),
                capacity,
                shortfall
            ),
        });
    }

    for (index, hours) in working.iter().zip(distribute_hours(scheduled, working.len())) {
        if let Some(day) = week.days.get_mut(*index) {
            day.hours = hours;
        }
    }
    for day in week.days.iter_mut().filter(|d| !d.working) {
        day.hours = 0;
    }

    week.hours.base = BASE_WEEKLY_HOURS;
    week.hours.holiday_deduction = holiday_deduction;
    week.hours.pto_deduction = pto_deduction;
    week.hours.required = required;
    week.hours.scheduled = scheduled;
    week.hours.shortfall = shortfall;
    week.hours.adjustments = adjustments;
}

fn apply_holidays(
    week: &mut EngineerWeek,
    dates: &[NaiveDate],
    holidays: &HolidaySet,
    adjustments: &mut Vec<HourAdjustment>,
) -> u32 {
    let mut deduction = 0;
    for (day, date) in week.days.iter_mut().zip(dates) {
        let Some(name) = holidays.name(*date) else {
            continue;
        };
        day.holiday = Some(name.to_string());

        if day.working {
            day.working = false;
            deduction += ABSENCE_DEDUCTION_HOURS;
            adjustments.push(HourAdjustment {
                rule: AdjustmentRule::Holiday,
                date: Some(*date),
                hours_delta: -(ABSENCE_DEDUCTION_HOURS as i32),
                reasoning: format!("{} observed on {}", name, date),
            });
        } else {
            adjustments.push(HourAdjustment {
                rule: AdjustmentRule::Holiday,
                date: Some(*date),
                hours_delta: 0,
                reasoning: format!("{} on {} falls on a day already off", name, date),
            });
        }
    }
    deduction
}

fn apply_pto(
    week: &mut EngineerWeek,
    dates: &[NaiveDate],
    pto: &[PtoRecord],
    adjustments: &mut Vec<HourAdjustment>,
) -> u32 {
    let mut deduction = 0;
    let records: Vec<&PtoRecord> = pto.iter().filter(|r| r.engineer == week.engineer).collect();

    for (day, date) in week.days.iter_mut().zip(dates) {
        if !day.working || !records.iter().any(|r| r.covers(*date)) {
            continue;
        }
        day.pto = true;

        if is_required_day(*date) {
            day.requires_approval = true;
            adjustments.push(HourAdjustment {
                rule: AdjustmentRule::RequiredDayPto,
                date: Some(*date),
                hours_delta: 0,
                reasoning: format!(
                    "PTO on required day {} needs a swap or manager approval",
                    date
                ),
            });
        } else {
            day.working = false;
            deduction += ABSENCE_DEDUCTION_HOURS;
            adjustments.push(HourAdjustment {
                rule: AdjustmentRule::Pto,
                date: Some(*date),
                hours_delta: -(ABSENCE_DEDUCTION_HOURS as i32),
                reasoning: format!("PTO on {}", date),
            });
        }
    }
    deduction
}

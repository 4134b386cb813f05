//! Derived schedule models.
//!
//! Everything in this module is computed from the team configuration and the
//! overlay lists on every query; none of it is persisted. Re-deriving a week
//! with the same inputs always yields the same values.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The resolved state of one engineer on one date.
///
/// # Example
///
/// ```
/// use rotation_engine::models::DayAssignment;
///
/// let day = DayAssignment::off();
/// assert!(!day.working);
/// assert_eq!(day.hours, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    /// Whether the engineer is present on this date.
    pub working: bool,
    /// Hours scheduled for this date (10, 8, a reduced value, or 0 when off).
    pub hours: u32,
    /// Whether the engineer is on call this week.
    pub is_on_call: bool,
    /// Whether this date is the team's required day (Tuesday).
    pub is_required_day: bool,
    /// Whether an approved swap changed presence on this date.
    pub swapped: bool,
    /// Whether the engineer has PTO recorded on this date.
    #[serde(default)]
    pub pto: bool,
    /// Set when PTO falls on the required day and needs a swap or manager sign-off.
    #[serde(default)]
    pub requires_approval: bool,
    /// Name of the statutory holiday observed on this date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
}

impl DayAssignment {
    /// A working day with the given hours.
    pub fn working(hours: u32) -> Self {
        Self {
            working: true,
            hours,
            ..Self::default()
        }
    }

    /// A day off.
    pub fn off() -> Self {
        Self::default()
    }
}

/// One (date, engineer, assignment) row of a generated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// The engineer name.
    pub engineer: String,
    /// The resolved assignment.
    pub assignment: DayAssignment,
}

/// The rule that produced an hour adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentRule {
    /// A full PTO day reduced the weekly requirement.
    Pto,
    /// A statutory holiday reduced the weekly requirement.
    Holiday,
    /// PTO on the required day was flagged instead of deducted.
    RequiredDayPto,
    /// The requirement did not fit into the remaining working days.
    CapacityCap,
    /// The requirement dropped to zero or below.
    RequirementExhausted,
}

/// A single entry in a week's hour adjustment trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourAdjustment {
    /// Which rule applied.
    pub rule: AdjustmentRule,
    /// The date the rule was triggered by, when it is date-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Change to the weekly hours (negative for reductions).
    pub hours_delta: i32,
    /// Human-readable explanation.
    pub reasoning: String,
}

/// Weekly hour totals for one engineer after PTO and holiday reductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// Base requirement before reductions (always 40).
    pub base: u32,
    /// Hours removed for PTO days.
    pub pto_deduction: u32,
    /// Hours removed for holidays.
    pub holiday_deduction: u32,
    /// Requirement after reductions, floored at zero.
    pub required: u32,
    /// Hours actually distributed across the remaining working days.
    pub scheduled: u32,
    /// Required hours that could not be placed within per-day capacity.
    pub shortfall: u32,
    /// The adjustments that produced these totals, in application order.
    pub adjustments: Vec<HourAdjustment>,
}

/// One engineer's resolved week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineerWeek {
    /// The engineer name.
    pub engineer: String,
    /// The rotation letter.
    pub letter: char,
    /// The base rotation day off, before the on-call overlay discards it.
    pub rotation_day_off: Weekday,
    /// Whether this engineer is on call this week.
    pub on_call: bool,
    /// Monday through Friday, in order.
    pub days: Vec<DayAssignment>,
    /// Weekly hour totals.
    pub hours: WeeklyHours,
}

impl EngineerWeek {
    /// Returns the number of days marked as working.
    pub fn working_days(&self) -> usize {
        self.days.iter().filter(|d| d.working).count()
    }
}

/// A fully resolved Monday–Friday week for the whole team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// The Monday that starts this week.
    pub week_start: NaiveDate,
    /// Weeks elapsed since the rotation anchor week (negative before it).
    pub week_index: i64,
    /// The on-call engineer, if on-call is enabled.
    pub on_call: Option<String>,
    /// One entry per engineer, in roster order.
    pub engineers: Vec<EngineerWeek>,
}

impl WeekSchedule {
    /// Returns the Monday–Friday dates of this week.
    pub fn dates(&self) -> Vec<NaiveDate> {
        crate::calculation::workweek_dates(self.week_start)
    }

    /// Returns the resolved week for a named engineer.
    pub fn engineer(&self, name: &str) -> Option<&EngineerWeek> {
        self.engineers.iter().find(|e| e.engineer == name)
    }

    /// Returns the assignment for a named engineer on a date in this week.
    pub fn assignment(&self, name: &str, date: NaiveDate) -> Option<&DayAssignment> {
        let offset = (date - self.week_start).num_days();
        if !(0..5).contains(&offset) {
            return None;
        }
        self.engineer(name)
            .and_then(|e| e.days.get(offset as usize))
    }

    /// Flattens the week into (date, engineer, assignment) rows, date-major.
    pub fn rows(&self) -> Vec<ScheduledDay> {
        let dates = self.dates();
        let mut rows = Vec::with_capacity(dates.len() * self.engineers.len());
        for (offset, date) in dates.iter().enumerate() {
            for week in &self.engineers {
                if let Some(assignment) = week.days.get(offset) {
                    rows.push(ScheduledDay {
                        date: *date,
                        engineer: week.engineer.clone(),
                        assignment: assignment.clone(),
                    });
                }
            }
        }
        rows
    }
}

/// Presence on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCoverage {
    /// The calendar date.
    pub date: NaiveDate,
    /// Number of engineers working.
    pub count: usize,
    /// Names of the engineers working, in roster order.
    pub present: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_constructor_sets_hours() {
        let day = DayAssignment::working(10);
        assert!(day.working);
        assert_eq!(day.hours, 10);
        assert!(!day.swapped);
        assert!(day.holiday.is_none());
    }

    #[test]
    fn test_holiday_is_skipped_when_absent() {
        let json = serde_json::to_string(&DayAssignment::off()).unwrap();
        assert!(!json.contains("holiday"));
    }

    #[test]
    fn test_adjustment_rule_serializes_snake_case() {
        let json = serde_json::to_string(&AdjustmentRule::RequiredDayPto).unwrap();
        assert_eq!(json, "\"required_day_pto\"");
    }
}

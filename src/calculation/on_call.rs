//! On-call overlay.
//!
//! Selects one engineer per week by strict round-robin over roster order and
//! converts their week from 4×10 to 5×8. Their rotation day off for that week
//! is discarded, not banked.

use crate::config::TeamConfig;
use crate::models::{DayAssignment, Engineer, WeekSchedule};

/// Hours per day for the on-call engineer.
pub const ON_CALL_DAILY_HOURS: u32 = 8;

/// Returns the on-call engineer for a week index, or `None` when on-call is
/// disabled.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::on_call_engineer;
/// use rotation_engine::config::TeamConfig;
///
/// let config = TeamConfig::default_team();
/// assert_eq!(on_call_engineer(&config, 0).unwrap().name, "Alex");
/// assert_eq!(on_call_engineer(&config, 7).unwrap().name, "Blake");
/// assert_eq!(on_call_engineer(&config, -1).unwrap().name, "Fiona");
///
/// let disabled = config.with_on_call(false);
/// assert!(on_call_engineer(&disabled, 0).is_none());
/// ```
pub fn on_call_engineer(config: &TeamConfig, week_index: i64) -> Option<&Engineer> {
    if !config.on_call_enabled() || config.team_size() == 0 {
        return None;
    }
    let position = week_index.rem_euclid(config.team_size() as i64) as usize;
    config.engineers().get(position)
}

/// Applies the on-call override to a base week.
pub fn apply_on_call(config: &TeamConfig, week: &mut WeekSchedule) {
    let Some(engineer) = on_call_engineer(config, week.week_index) else {
        week.on_call = None;
        return;
    };

    week.on_call = Some(engineer.name.clone());
    for entry in week.engineers.iter_mut() {
        let is_on_call = entry.engineer == engineer.name;
        entry.on_call = is_on_call;
        for day in entry.days.iter_mut() {
            day.is_on_call = is_on_call;
            if is_on_call {
                *day = DayAssignment {
                    is_on_call: true,
                    is_required_day: day.is_required_day,
                    ..DayAssignment::working(ON_CALL_DAILY_HOURS)
                };
            }
        }
    }
}

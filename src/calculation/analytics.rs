//! Fairness analytics.
//!
//! Summarises how evenly the rotation spreads days off and on-call duty over
//! a window of weeks, plus swap activity. Days off are counted on the base
//! rotation with on-call applied, so an on-call week contributes no day off.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TeamConfig;
use crate::models::{SwapRequest, SwapStatus};

use super::calendar::{FLEX_DAYS, week_start};
use super::on_call::apply_on_call;
use super::rotation::base_week;

/// Days off counted per flexible weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOffCounts {
    /// Mondays off.
    pub monday: u32,
    /// Wednesdays off.
    pub wednesday: u32,
    /// Thursdays off.
    pub thursday: u32,
    /// Fridays off.
    pub friday: u32,
}

impl DayOffCounts {
    /// Returns the count for a weekday; always 0 for the required day and weekends.
    pub fn get(&self, weekday: Weekday) -> u32 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            _ => 0,
        }
    }

    fn increment(&mut self, weekday: Weekday) {
        match weekday {
            Weekday::Mon => self.monday += 1,
            Weekday::Wed => self.wednesday += 1,
            Weekday::Thu => self.thursday += 1,
            Weekday::Fri => self.friday += 1,
            _ => {}
        }
    }

    /// Total days off across all weekdays.
    pub fn total(&self) -> u32 {
        self.monday + self.wednesday + self.thursday + self.friday
    }
}

/// Per-engineer fairness figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineerFairness {
    /// The engineer name.
    pub engineer: String,
    /// Rotation days off by weekday.
    pub days_off: DayOffCounts,
    /// Weeks spent on call.
    pub on_call_weeks: u32,
}

/// Swap activity summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapStatistics {
    /// Number of requests considered.
    pub total: u32,
    /// Requests awaiting a decision.
    pub pending: u32,
    /// Approved requests.
    pub approved: u32,
    /// Rejected requests.
    pub rejected: u32,
    /// Approved as a percentage of decided requests, one decimal place.
    pub approval_rate: Decimal,
    /// Requests made, per requester.
    pub by_requester: BTreeMap<String, u32>,
    /// Requests received, per target.
    pub by_target: BTreeMap<String, u32>,
}

/// Rotation fairness over a window of weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    /// Monday of the first analysed week.
    pub start: NaiveDate,
    /// Number of weeks analysed.
    pub weeks: u32,
    /// One entry per engineer, in roster order.
    pub engineers: Vec<EngineerFairness>,
    /// Team-wide days off per weekday.
    pub weekday_totals: DayOffCounts,
    /// Mean over flexible weekdays of the sample standard deviation of
    /// per-engineer counts. Zero is perfectly even; lower is fairer.
    pub fairness_score: f64,
    /// Swaps dated inside the window.
    pub swaps: SwapStatistics,
}

/// Builds a fairness report for `weeks` weeks starting with the week of `start`.
///
/// # Example
///
/// ```
/// use rotation_engine::calculation::fairness_report;
/// use rotation_engine::config::TeamConfig;
/// use chrono::NaiveDate;
///
/// let config = TeamConfig::default_team().with_on_call(false);
/// let report = fairness_report(&config, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 8, &[]);
///
/// // Four blocks of two weeks: every engineer has each flexible day off twice.
/// assert_eq!(report.fairness_score, 0.0);
/// assert!(report.engineers.iter().all(|e| e.days_off.total() == 8));
/// ```
pub fn fairness_report(
    config: &TeamConfig,
    start: NaiveDate,
    weeks: u32,
    swaps: &[SwapRequest],
) -> FairnessReport {
    let first = week_start(start);
    let mut engineers: Vec<EngineerFairness> = config
        .engineers()
        .iter()
        .map(|e| EngineerFairness {
            engineer: e.name.clone(),
            days_off: DayOffCounts::default(),
            on_call_weeks: 0,
        })
        .collect();
    let mut weekday_totals = DayOffCounts::default();

    for offset in 0..i64::from(weeks) {
        let mut week = base_week(config, first + Duration::weeks(offset));
        apply_on_call(config, &mut week);

        for (entry, stats) in week.engineers.iter().zip(engineers.iter_mut()) {
            if entry.on_call {
                stats.on_call_weeks += 1;
            } else {
                stats.days_off.increment(entry.rotation_day_off);
                weekday_totals.increment(entry.rotation_day_off);
            }
        }
    }

    let counts_per_day: Vec<Vec<f64>> = FLEX_DAYS
        .iter()
        .map(|day| engineers.iter().map(|e| f64::from(e.days_off.get(*day))).collect())
        .collect();
    let fairness_score = if counts_per_day.is_empty() {
        0.0
    } else {
        counts_per_day.iter().map(|c| sample_std_dev(c)).sum::<f64>() / counts_per_day.len() as f64
    };

    let end = first + Duration::weeks(i64::from(weeks));
    let in_window: Vec<&SwapRequest> = swaps
        .iter()
        .filter(|s| first <= s.date && s.date < end)
        .collect();

    FairnessReport {
        start: first,
        weeks,
        engineers,
        weekday_totals,
        fairness_score,
        swaps: swap_statistics(in_window),
    }
}

/// Summarises swap requests by status and participant.
pub fn swap_statistics<'a>(swaps: impl IntoIterator<Item = &'a SwapRequest>) -> SwapStatistics {
    let mut stats = SwapStatistics::default();
    for swap in swaps {
        stats.total += 1;
        match swap.status {
            SwapStatus::Pending => stats.pending += 1,
            SwapStatus::Approved => stats.approved += 1,
            SwapStatus::Rejected => stats.rejected += 1,
        }
        *stats.by_requester.entry(swap.requester.clone()).or_default() += 1;
        *stats.by_target.entry(swap.target.clone()).or_default() += 1;
    }

    let decided = stats.approved + stats.rejected;
    stats.approval_rate = if decided == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(stats.approved) * Decimal::ONE_HUNDRED / Decimal::from(decided)).round_dp(1)
    };
    stats
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

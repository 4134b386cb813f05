//! Swap overlay.
//!
//! Approved swaps are the last presence layer: each one exchanges the on/off
//! state of its requester and target on a single date. The base rotation is
//! never touched, so removing a swap from the input list and re-deriving the
//! week reproduces the original pattern.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{SwapRequest, SwapStatus, WeekSchedule};

use super::calendar::workday_offset;
use super::on_call::ON_CALL_DAILY_HOURS;
use super::rotation::ROTATION_DAILY_HOURS;

/// The result of overlaying one swap onto a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOverlay {
    /// Presence was exchanged on the swap date.
    Applied,
    /// The swap date is not a workday of this week.
    NotInWeek,
    /// The swap no longer exchanges an "on" with an "off" and was left out.
    Stale {
        /// Why the swap could not be applied.
        reason: String,
    },
}

/// Returns `(requester_working, target_working)` on `date`, or `None` if the
/// date or either engineer is not part of the week.
pub fn presence_pair(
    week: &WeekSchedule,
    requester: &str,
    target: &str,
    date: NaiveDate,
) -> Option<(bool, bool)> {
    let requester = week.assignment(requester, date)?;
    let target = week.assignment(target, date)?;
    Some((requester.working, target.working))
}

/// Exchanges presence between the swap's requester and target on its date.
///
/// The engineer who becomes present takes their usual daily hours (8 during
/// their on-call week, 10 otherwise); the one who becomes absent drops to 0.
/// Both days are marked `swapped`.
pub fn apply_swap(week: &mut WeekSchedule, swap: &SwapRequest) -> SwapOverlay {
    let Some(offset) = workday_offset(swap.date).filter(|_| week.dates().contains(&swap.date))
    else {
        return SwapOverlay::NotInWeek;
    };

    if swap.requester == swap.target {
        return SwapOverlay::Stale {
            reason: "requester and target are the same engineer".to_string(),
        };
    }

    match presence_pair(week, &swap.requester, &swap.target, swap.date) {
        None => SwapOverlay::Stale {
            reason: "engineer is no longer on the roster".to_string(),
        },
        Some((a, b)) if a == b => SwapOverlay::Stale {
            reason: if a {
                "both engineers are working".to_string()
            } else {
                "both engineers are off".to_string()
            },
        },
        Some(_) => {
            for entry in week.engineers.iter_mut() {
                if entry.engineer != swap.requester && entry.engineer != swap.target {
                    continue;
                }
                let capacity = if entry.on_call {
                    ON_CALL_DAILY_HOURS
                } else {
                    ROTATION_DAILY_HOURS
                };
                if let Some(day) = entry.days.get_mut(offset) {
                    day.working = !day.working;
                    day.hours = if day.working { capacity } else { 0 };
                    day.swapped = true;
                }
            }
            SwapOverlay::Applied
        }
    }
}

/// Applies every approved swap dated inside the week, in slice order.
///
/// Entries that are not approved are ignored. Stale swaps are skipped and
/// logged; they are never half-applied.
pub fn apply_approved_swaps(week: &mut WeekSchedule, swaps: &[SwapRequest]) -> usize {
    let mut applied = 0;
    for swap in swaps.iter().filter(|s| s.status == SwapStatus::Approved) {
        match apply_swap(week, swap) {
            SwapOverlay::Applied => applied += 1,
            SwapOverlay::NotInWeek => {}
            SwapOverlay::Stale { reason } => {
                warn!(
                    swap_id = %swap.id,
                    date = %swap.date,
                    requester = %swap.requester,
                    target = %swap.target,
                    reason = %reason,
                    "Skipping stale approved swap"
                );
            }
        }
    }
    applied
}

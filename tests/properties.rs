//! Property tests for schedule resolution.
//!
//! Rosters, rotation periods, anchors and dates are generated at random;
//! each property must hold for every combination.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use rotation_engine::calculation::{
    RegionHolidays, ScheduleInputs, daily_coverage, distribute_hours, resolve_week,
    rotation_day_off, week_index,
};
use rotation_engine::config::TeamConfig;
use rotation_engine::models::{Engineer, PtoRecord, SwapRequest};

fn team(size: usize, period: u32, anchor_offset: i64, on_call: bool) -> TeamConfig {
    let engineers = (0..size)
        .map(|i| {
            let letter = char::from(b'A' + i as u8);
            Engineer::new(&format!("Engineer {}", letter), letter, "US", Some("CA"))
        })
        .collect();
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(anchor_offset);
    TeamConfig::new(engineers, period, anchor)
        .unwrap()
        .with_on_call(on_call)
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

fn no_overlays<'a>(holidays: &'a RegionHolidays) -> ScheduleInputs<'a> {
    const NO_SWAPS: &[SwapRequest] = &[];
    const NO_PTO: &[PtoRecord] = &[];
    ScheduleInputs::new(NO_SWAPS, NO_PTO, holidays)
}

proptest! {
    #[test]
    fn tuesday_is_always_worked(
        size in 2usize..12,
        period in 1u32..5,
        anchor in -400i64..400,
        offset in -2000i64..2000,
        on_call in any::<bool>(),
    ) {
        let config = team(size, period, anchor, on_call);
        let holidays = RegionHolidays::new();
        let week = resolve_week(&config, day(offset), &no_overlays(&holidays));

        for engineer in &week.engineers {
            let tuesday = &engineer.days[1];
            prop_assert!(tuesday.working);
            prop_assert!(tuesday.is_required_day);
            prop_assert!(tuesday.hours > 0);
        }
    }

    #[test]
    fn every_week_totals_forty_hours(
        size in 2usize..12,
        period in 1u32..5,
        offset in -2000i64..2000,
        on_call in any::<bool>(),
    ) {
        let config = team(size, period, 0, on_call);
        let holidays = RegionHolidays::new();
        let week = resolve_week(&config, day(offset), &no_overlays(&holidays));

        for engineer in &week.engineers {
            let total: u32 = engineer.days.iter().map(|d| d.hours).sum();
            prop_assert_eq!(total, 40);
            prop_assert_eq!(engineer.hours.shortfall, 0);
            let expected_days = if engineer.on_call { 5 } else { 4 };
            prop_assert_eq!(engineer.working_days(), expected_days);
            prop_assert_ne!(engineer.rotation_day_off, Weekday::Tue);
        }
    }

    #[test]
    fn at_most_one_engineer_on_call(
        size in 2usize..12,
        offset in -2000i64..2000,
        on_call in any::<bool>(),
    ) {
        let config = team(size, 2, 0, on_call);
        let holidays = RegionHolidays::new();
        let week = resolve_week(&config, day(offset), &no_overlays(&holidays));

        let count = week.engineers.iter().filter(|e| e.on_call).count();
        prop_assert_eq!(count, usize::from(on_call));
        prop_assert_eq!(week.on_call.is_some(), on_call);
    }

    #[test]
    fn on_call_cycles_through_roster(size in 2usize..12, start in -500i64..500) {
        let config = team(size, 2, 0, true);
        let holidays = RegionHolidays::new();
        let mut seen = std::collections::HashSet::new();
        for week in 0..size as i64 {
            let schedule = resolve_week(&config, day(start * 7 + week * 7), &no_overlays(&holidays));
            if let Some(name) = schedule.on_call {
                seen.insert(name);
            }
        }
        prop_assert_eq!(seen.len(), size);
    }

    #[test]
    fn coverage_matches_working_flags(
        size in 2usize..12,
        period in 1u32..5,
        offset in -2000i64..2000,
    ) {
        let config = team(size, period, 0, true);
        let holidays = RegionHolidays::new();
        let week = resolve_week(&config, day(offset), &no_overlays(&holidays));

        for (index, coverage) in daily_coverage(&week).iter().enumerate() {
            let working = week.engineers.iter().filter(|e| e.days[index].working).count();
            prop_assert_eq!(coverage.count, working);
            prop_assert_eq!(coverage.present.len(), working);
            prop_assert!(coverage.count <= size);
        }
    }

    #[test]
    fn rotation_day_off_is_a_flex_day(ordinal in 0usize..64, block in -1000i64..1000) {
        let off = rotation_day_off(ordinal, block);
        prop_assert!(matches!(off, Weekday::Mon | Weekday::Wed | Weekday::Thu | Weekday::Fri));
    }

    #[test]
    fn consecutive_blocks_move_each_engineer(ordinal in 0usize..64, block in -1000i64..1000) {
        prop_assert_ne!(rotation_day_off(ordinal, block), rotation_day_off(ordinal, block + 1));
        prop_assert_eq!(rotation_day_off(ordinal, block), rotation_day_off(ordinal, block + 4));
    }

    #[test]
    fn week_index_is_shared_within_a_week(anchor in -400i64..400, offset in -2000i64..2000) {
        let anchor = day(anchor);
        let date = day(offset);
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        prop_assert_eq!(week_index(anchor, date), week_index(anchor, monday));
        prop_assert_eq!(week_index(anchor, monday + Duration::days(7)), week_index(anchor, monday) + 1);
    }

    #[test]
    fn distributed_hours_sum_and_front_load(total in 0u32..200, slots in 1usize..6) {
        let hours = distribute_hours(total, slots);
        prop_assert_eq!(hours.len(), slots);
        prop_assert_eq!(hours.iter().sum::<u32>(), total);
        for pair in hours.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
            prop_assert!(pair[0] - pair[1] <= 1);
        }
    }

    #[test]
    fn resolution_is_deterministic(
        size in 2usize..8,
        period in 1u32..4,
        offset in -500i64..500,
    ) {
        let config = team(size, period, 0, true);
        let holidays = RegionHolidays::new();
        let first = resolve_week(&config, day(offset), &no_overlays(&holidays));
        let second = resolve_week(&config, day(offset), &no_overlays(&holidays));
        prop_assert_eq!(first, second);
    }
}

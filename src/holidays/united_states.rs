//! United States statutory holidays.
//!
//! Federal holidays:
//! * New Year's Day (Jan 1; Sat → preceding Fri, Sun → Mon)
//! * Martin Luther King Jr. Day (3rd Mon in Jan)
//! * Washington's Birthday (3rd Mon in Feb)
//! * Memorial Day (last Mon in May)
//! * Juneteenth (Jun 19, from 2021; observed like New Year's)
//! * Independence Day (Jul 4; observed)
//! * Labor Day (1st Mon in Sep)
//! * Columbus Day (2nd Mon in Oct)
//! * Veterans Day (Nov 11; observed)
//! * Thanksgiving (4th Thu in Nov)
//! * Christmas Day (Dec 25; observed)
//!
//! California adds César Chávez Day (Mar 31, Sun → Mon) and the day after
//! Thanksgiving.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::HolidaySet;

use super::rules::{insert_observed, last_weekday, nearest_weekday, nth_weekday};

/// Builds the US holiday set for a year and optional state.
pub(crate) fn holidays(year: i32, state: Option<&str>) -> HolidaySet {
    let mut set = HolidaySet::new();

    let mut fixed = vec![
        (1, 1, "New Year's Day"),
        (7, 4, "Independence Day"),
        (11, 11, "Veterans Day"),
        (12, 25, "Christmas Day"),
    ];
    if year >= 2021 {
        fixed.push((6, 19, "Juneteenth National Independence Day"));
    }
    for (month, day, name) in fixed {
        if let Some(actual) = NaiveDate::from_ymd_opt(year, month, day) {
            insert_observed(&mut set, actual, nearest_weekday(actual), name);
        }
    }
    // New Year's Day of the following year observed on Dec 31 of this one.
    if let Some(next_new_year) = NaiveDate::from_ymd_opt(year + 1, 1, 1) {
        let observed = nearest_weekday(next_new_year);
        if observed < next_new_year {
            insert_observed(&mut set, next_new_year, observed, "New Year's Day");
        }
    }

    let floating = [
        (nth_weekday(year, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day"),
        (nth_weekday(year, 2, Weekday::Mon, 3), "Washington's Birthday"),
        (last_weekday(year, 5, Weekday::Mon), "Memorial Day"),
        (nth_weekday(year, 9, Weekday::Mon, 1), "Labor Day"),
        (nth_weekday(year, 10, Weekday::Mon, 2), "Columbus Day"),
        (nth_weekday(year, 11, Weekday::Thu, 4), "Thanksgiving"),
    ];
    for (date, name) in floating {
        if let Some(date) = date {
            set.insert(date, name);
        }
    }

    if state == Some("CA") {
        if let Some(actual) = NaiveDate::from_ymd_opt(year, 3, 31) {
            let observed = if actual.weekday() == Weekday::Sun {
                actual + Duration::days(1)
            } else {
                actual
            };
            insert_observed(&mut set, actual, observed, "César Chávez Day");
        }
        if let Some(thanksgiving) = nth_weekday(year, 11, Weekday::Thu, 4) {
            set.insert(thanksgiving + Duration::days(1), "Day After Thanksgiving");
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_federal_holidays_2024() {
        let set = holidays(2024, None);
        assert_eq!(set.name(d(2024, 1, 1)), Some("New Year's Day"));
        assert_eq!(set.name(d(2024, 1, 15)), Some("Martin Luther King Jr. Day"));
        assert_eq!(set.name(d(2024, 2, 19)), Some("Washington's Birthday"));
        assert_eq!(set.name(d(2024, 5, 27)), Some("Memorial Day"));
        assert_eq!(
            set.name(d(2024, 6, 19)),
            Some("Juneteenth National Independence Day")
        );
        assert_eq!(set.name(d(2024, 7, 4)), Some("Independence Day"));
        assert_eq!(set.name(d(2024, 9, 2)), Some("Labor Day"));
        assert_eq!(set.name(d(2024, 10, 14)), Some("Columbus Day"));
        assert_eq!(set.name(d(2024, 11, 11)), Some("Veterans Day"));
        assert_eq!(set.name(d(2024, 11, 28)), Some("Thanksgiving"));
        assert_eq!(set.name(d(2024, 12, 25)), Some("Christmas Day"));
        assert_eq!(set.len(), 11);
    }

    #[test]
    fn test_saturday_independence_day_observed_friday() {
        // 2026-07-04 is a Saturday
        let set = holidays(2026, None);
        assert_eq!(set.name(d(2026, 7, 3)), Some("Independence Day (observed)"));
        assert!(!set.is_holiday(d(2026, 7, 4)));
    }

    #[test]
    fn test_saturday_new_year_observed_previous_december() {
        // 2022-01-01 is a Saturday, observed Friday 2021-12-31
        let set = holidays(2021, None);
        assert_eq!(set.name(d(2021, 12, 31)), Some("New Year's Day (observed)"));
    }

    #[test]
    fn test_no_juneteenth_before_2021() {
        let set = holidays(2020, None);
        assert!(!set.is_holiday(d(2020, 6, 19)));
    }

    #[test]
    fn test_california_additions() {
        let set = holidays(2024, Some("CA"));
        // 2024-03-31 is a Sunday
        assert_eq!(set.name(d(2024, 4, 1)), Some("César Chávez Day (observed)"));
        assert_eq!(set.name(d(2024, 11, 29)), Some("Day After Thanksgiving"));
        assert!(!holidays(2024, Some("TX")).is_holiday(d(2024, 11, 29)));
    }
}

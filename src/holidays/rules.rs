//! Date rules shared by the statutory holiday calendars.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::HolidaySet;

/// Returns true for Saturday and Sunday.
pub(crate) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `n`-th (1-based) occurrence of `weekday` in a month.
pub(crate) fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// The last occurrence of `weekday` in a month.
pub(crate) fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut date = first_of_next.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}

/// The last `weekday` strictly before `date`.
pub(crate) fn weekday_before(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let mut current = date.pred_opt()?;
    while current.weekday() != weekday {
        current = current.pred_opt()?;
    }
    Some(current)
}

/// Easter Sunday in the Gregorian calendar (anonymous Gregorian algorithm).
pub(crate) fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// US observance: Saturday moves back to Friday, Sunday forward to Monday.
pub(crate) fn nearest_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Inserts a holiday under its observed name when observance moved it.
pub(crate) fn insert_observed(set: &mut HolidaySet, actual: NaiveDate, observed: NaiveDate, name: &str) {
    if actual == observed {
        set.insert(observed, name);
    } else {
        set.insert(observed, &format!("{} (observed)", name));
    }
}

/// Places a group of fixed-date holidays so weekend dates roll forward to the
/// next weekday not already taken by another holiday in the group.
///
/// Weekday holidays are placed first so a rolled holiday never displaces one
/// that falls on its real date (Christmas on a Sunday observes on Tuesday
/// because Boxing Day already holds Monday).
pub(crate) fn roll_forward_group(set: &mut HolidaySet, group: &[(NaiveDate, &str)]) {
    let mut taken: Vec<NaiveDate> = Vec::new();
    for (date, name) in group.iter().filter(|(d, _)| !is_weekend(*d)) {
        set.insert(*date, name);
        taken.push(*date);
    }
    for (date, name) in group.iter().filter(|(d, _)| is_weekend(*d)) {
        let mut observed = *date;
        while is_weekend(observed) || taken.contains(&observed) || set.is_holiday(observed) {
            observed += Duration::days(1);
        }
        insert_observed(set, *date, observed, name);
        taken.push(observed);
    }
}

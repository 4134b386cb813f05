//! Canadian statutory holidays.
//!
//! National holidays:
//! * New Year's Day, Canada Day, Christmas Day, Boxing Day (weekend dates
//!   roll forward to the next free weekday)
//! * Good Friday (two days before Easter Sunday)
//! * Victoria Day (Monday before May 25; National Patriots' Day in QC)
//! * Labour Day (1st Mon in Sep)
//! * National Day for Truth and Reconciliation (Sep 30, from 2021)
//! * Thanksgiving (2nd Mon in Oct)
//! * Remembrance Day (Nov 11; not observed in ON and QC)
//!
//! Provincial additions: the February holiday (3rd Mon in Feb) in AB, BC,
//! MB, NB, NS, ON, PE and SK; the August civic holiday (1st Mon in Aug) in
//! BC, NB, NT, NU, ON and SK; Saint-Jean-Baptiste Day (Jun 24) in QC.

use chrono::{Duration, NaiveDate, Weekday};

use crate::models::HolidaySet;

use super::rules::{easter_sunday, nth_weekday, roll_forward_group, weekday_before};

fn february_holiday(province: &str) -> Option<&'static str> {
    match province {
        "AB" | "BC" | "NB" | "ON" | "SK" => Some("Family Day"),
        "MB" => Some("Louis Riel Day"),
        "NS" => Some("Heritage Day"),
        "PE" => Some("Islander Day"),
        _ => None,
    }
}

fn civic_holiday(province: &str) -> Option<&'static str> {
    match province {
        "BC" => Some("British Columbia Day"),
        "NB" => Some("New Brunswick Day"),
        "SK" => Some("Saskatchewan Day"),
        "NT" | "NU" | "ON" => Some("Civic Holiday"),
        _ => None,
    }
}

/// Builds the Canadian holiday set for a year and optional province.
pub(crate) fn holidays(year: i32, province: Option<&str>) -> HolidaySet {
    let mut set = HolidaySet::new();
    let province = province.unwrap_or_default();

    let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);

    let mut floating: Vec<(Option<NaiveDate>, &str)> = vec![
        (easter_sunday(year).map(|e| e - Duration::days(2)), "Good Friday"),
        (
            fixed(5, 25).and_then(|d| weekday_before(d, Weekday::Mon)),
            if province == "QC" {
                "National Patriots' Day"
            } else {
                "Victoria Day"
            },
        ),
        (nth_weekday(year, 9, Weekday::Mon, 1), "Labour Day"),
        (nth_weekday(year, 10, Weekday::Mon, 2), "Thanksgiving"),
    ];
    if let Some(name) = february_holiday(province) {
        floating.push((nth_weekday(year, 2, Weekday::Mon, 3), name));
    }
    if let Some(name) = civic_holiday(province) {
        floating.push((nth_weekday(year, 8, Weekday::Mon, 1), name));
    }
    for (date, name) in floating {
        if let Some(date) = date {
            set.insert(date, name);
        }
    }

    let mut singles: Vec<(Option<NaiveDate>, &str)> = vec![
        (fixed(1, 1), "New Year's Day"),
        (fixed(7, 1), "Canada Day"),
    ];
    if year >= 2021 {
        singles.push((
            fixed(9, 30),
            "National Day for Truth and Reconciliation",
        ));
    }
    if !matches!(province, "ON" | "QC") {
        singles.push((fixed(11, 11), "Remembrance Day"));
    }
    if province == "QC" {
        singles.push((fixed(6, 24), "Saint-Jean-Baptiste Day"));
    }
    for (date, name) in singles {
        if let Some(date) = date {
            roll_forward_group(&mut set, &[(date, name)]);
        }
    }

    if let (Some(christmas), Some(boxing)) = (fixed(12, 25), fixed(12, 26)) {
        roll_forward_group(
            &mut set,
            &[(christmas, "Christmas Day"), (boxing, "Boxing Day")],
        );
    }

    set
}

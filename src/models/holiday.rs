//! Holiday set model.
//!
//! This module contains the [`HolidaySet`] type: for one region, the mapping
//! from observed holiday date to holiday name. The engine only uses it to
//! decide whether a date is a statutory holiday for hour-reduction purposes.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Observed holidays for one region.
///
/// # Example
///
/// ```
/// use rotation_engine::models::HolidaySet;
/// use chrono::NaiveDate;
///
/// let mut holidays = HolidaySet::new();
/// let july_4 = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
/// holidays.insert(july_4, "Independence Day");
///
/// assert!(holidays.is_holiday(july_4));
/// assert_eq!(holidays.name(july_4), Some("Independence Day"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday. When two holidays share a date the first name is kept.
    pub fn insert(&mut self, date: NaiveDate, name: &str) {
        self.holidays
            .entry(date)
            .or_insert_with(|| name.to_string());
    }

    /// Adds every holiday from another set.
    pub fn extend(&mut self, other: &HolidaySet) {
        for (date, name) in other.iter() {
            self.insert(date, name);
        }
    }

    /// Checks if a date is a holiday in this set.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Returns the holiday name for a date.
    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Iterates holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.holidays.iter().map(|(d, n)| (*d, n.as_str()))
    }

    /// Returns the weekday (Mon–Fri) holidays within an inclusive range.
    pub fn weekdays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, &str)> {
        self.holidays
            .range(start..=end)
            .filter(|(d, _)| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|(d, n)| (*d, n.as_str()))
            .collect()
    }

    /// Returns the number of holidays.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the set has no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl FromIterator<(NaiveDate, String)> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        let mut set = HolidaySet::new();
        for (date, name) in iter {
            set.insert(date, &name);
        }
        set
    }
}

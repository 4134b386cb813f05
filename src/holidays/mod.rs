//! Holiday providers.
//!
//! A [`HolidayProvider`] resolves, for a region and year, the set of observed
//! statutory holiday dates. The engine never consults a process-wide holiday
//! table: every schedule computation receives its holiday sets explicitly,
//! so synthetic sets can be substituted in tests.

mod canada;
mod rules;
mod united_states;

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::models::{HolidaySet, Region};

/// Resolves statutory holidays for a region.
pub trait HolidayProvider: Send + Sync {
    /// Returns the holidays observed in `region` during `year`.
    fn holidays(&self, region: &Region, year: i32) -> HolidaySet;

    /// Returns the holidays observed in `region` across an inclusive year range.
    fn holidays_between(&self, region: &Region, first_year: i32, last_year: i32) -> HolidaySet {
        let mut set = HolidaySet::new();
        for year in first_year..=last_year {
            set.extend(&self.holidays(region, year));
        }
        set
    }
}

/// Built-in statutory holiday rules for the United States and Canada.
///
/// # Example
///
/// ```
/// use rotation_engine::holidays::{HolidayProvider, StatutoryHolidays};
/// use rotation_engine::models::Region;
/// use chrono::NaiveDate;
///
/// let holidays = StatutoryHolidays.holidays(&Region::new("US", Some("CA")), 2024);
/// assert!(holidays.is_holiday(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatutoryHolidays;

impl StatutoryHolidays {
    /// Returns true if the provider has rules for the region's country.
    pub fn supports(region: &Region) -> bool {
        matches!(region.country(), "US" | "CA")
    }
}

impl HolidayProvider for StatutoryHolidays {
    fn holidays(&self, region: &Region, year: i32) -> HolidaySet {
        match region.country() {
            "US" => united_states::holidays(year, region.subdivision()),
            "CA" => canada::holidays(year, region.subdivision()),
            other => {
                warn!(country = %other, region = %region, "Country not supported, no statutory holidays applied");
                HolidaySet::new()
            }
        }
    }
}

/// Explicit holiday dates, per region or for every region.
///
/// Used for synthetic holiday sets and for company-wide days off.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    everywhere: HolidaySet,
    by_region: HashMap<Region, HolidaySet>,
}

impl StaticHolidays {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday observed in every region.
    pub fn everywhere(mut self, date: NaiveDate, name: &str) -> Self {
        self.everywhere.insert(date, name);
        self
    }

    /// Adds a holiday observed in one region.
    pub fn in_region(mut self, region: Region, date: NaiveDate, name: &str) -> Self {
        self.by_region.entry(region).or_default().insert(date, name);
        self
    }

    /// Builds a provider that marks each date as a company day off everywhere.
    pub fn company_days_off(dates: &[NaiveDate]) -> Self {
        dates
            .iter()
            .fold(Self::new(), |acc, date| acc.everywhere(*date, "Company Day Off"))
    }
}

impl HolidayProvider for StaticHolidays {
    fn holidays(&self, region: &Region, year: i32) -> HolidaySet {
        let in_year = |set: &HolidaySet| -> Vec<(NaiveDate, String)> {
            set.iter()
                .filter(|(d, _)| d.year() == year)
                .map(|(d, n)| (d, n.to_string()))
                .collect()
        };

        let mut result: HolidaySet = self
            .by_region
            .get(region)
            .map(in_year)
            .unwrap_or_default()
            .into_iter()
            .collect();
        let everywhere: HolidaySet = in_year(&self.everywhere).into_iter().collect();
        result.extend(&everywhere);
        result
    }
}

/// Combines providers; earlier layers win when two name the same date.
#[derive(Default)]
pub struct LayeredHolidays {
    layers: Vec<Box<dyn HolidayProvider>>,
}

impl LayeredHolidays {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider as the lowest-priority layer.
    pub fn with(mut self, provider: impl HolidayProvider + 'static) -> Self {
        self.layers.push(Box::new(provider));
        self
    }
}

impl HolidayProvider for LayeredHolidays {
    fn holidays(&self, region: &Region, year: i32) -> HolidaySet {
        let mut set = HolidaySet::new();
        for layer in &self.layers {
            set.extend(&layer.holidays(region, year));
        }
        set
    }
}

impl std::fmt::Debug for LayeredHolidays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredHolidays")
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_unsupported_country_is_empty() {
        let region = Region::new("FR", None);
        assert!(!StatutoryHolidays::supports(&region));
        assert!(StatutoryHolidays.holidays(&region, 2024).is_empty());
    }

    #[test]
    fn test_static_holidays_filter_by_year_and_region() {
        let toronto = Region::new("CA", Some("ON"));
        let provider = StaticHolidays::new()
            .in_region(toronto.clone(), d(2024, 3, 5), "Team Offsite")
            .everywhere(d(2025, 1, 2), "Shutdown");

        let set = provider.holidays(&toronto, 2024);
        assert_eq!(set.name(d(2024, 3, 5)), Some("Team Offsite"));
        assert!(!set.is_holiday(d(2025, 1, 2)));

        let other = provider.holidays(&Region::new("US", None), 2025);
        assert_eq!(other.name(d(2025, 1, 2)), Some("Shutdown"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_layered_statutory_wins_over_company_day() {
        let provider = LayeredHolidays::new()
            .with(StatutoryHolidays)
            .with(StaticHolidays::company_days_off(&[d(2024, 12, 24), d(2024, 12, 25)]));

        let set = provider.holidays(&Region::new("US", None), 2024);
        assert_eq!(set.name(d(2024, 12, 24)), Some("Company Day Off"));
        assert_eq!(set.name(d(2024, 12, 25)), Some("Christmas Day"));
    }

    #[test]
    fn test_holidays_between_spans_years() {
        let set = StatutoryHolidays.holidays_between(&Region::new("US", None), 2024, 2025);
        assert!(set.is_holiday(d(2024, 7, 4)));
        assert!(set.is_holiday(d(2025, 7, 4)));
    }
}

//! PTO records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The dates covered by a PTO record.
///
/// Persisted either as an inclusive `start`/`end` range or as an explicit
/// list of `dates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PtoSpan {
    /// An inclusive date range.
    Range {
        /// First day of absence.
        start: NaiveDate,
        /// Last day of absence.
        end: NaiveDate,
    },
    /// Individual dates.
    Dates {
        /// The days of absence.
        dates: Vec<NaiveDate>,
    },
}

/// A full-day absence for one engineer.
///
/// # Example
///
/// ```
/// use rotation_engine::models::PtoRecord;
/// use chrono::NaiveDate;
///
/// let pto = PtoRecord::range(
///     "Alex",
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
/// );
/// assert!(pto.covers(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
/// assert!(!pto.covers(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtoRecord {
    /// The absent engineer.
    pub engineer: String,
    /// The covered dates.
    #[serde(flatten)]
    pub span: PtoSpan,
}

impl PtoRecord {
    /// Creates a record covering an inclusive range.
    pub fn range(engineer: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            engineer: engineer.to_string(),
            span: PtoSpan::Range { start, end },
        }
    }

    /// Creates a record covering explicit dates.
    pub fn dates(engineer: &str, dates: Vec<NaiveDate>) -> Self {
        Self {
            engineer: engineer.to_string(),
            span: PtoSpan::Dates { dates },
        }
    }

    /// Returns true if the record marks `date` as absent.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match &self.span {
            PtoSpan::Range { start, end } => *start <= date && date <= *end,
            PtoSpan::Dates { dates } => dates.contains(&date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_dates_record_covers_only_listed_days() {
        let pto = PtoRecord::dates("Blake", vec![d(4), d(8)]);
        assert!(pto.covers(d(4)));
        assert!(!pto.covers(d(5)));
        assert!(pto.covers(d(8)));
    }

    #[test]
    fn test_range_and_dates_deserialize_from_yaml() {
        let records: Vec<PtoRecord> = serde_yaml::from_str(
            "- engineer: Alex\n  start: 2024-03-04\n  end: 2024-03-05\n\
             - engineer: Blake\n  dates: [2024-03-07]\n",
        )
        .unwrap();
        assert_eq!(records[0], PtoRecord::range("Alex", d(4), d(5)));
        assert_eq!(records[1], PtoRecord::dates("Blake", vec![d(7)]));
    }
}

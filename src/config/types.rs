//! Configuration types for team scheduling.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the team YAML file, and the validated
//! [`TeamConfig`] built from them.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::checked_week_span;
use crate::error::{EngineError, EngineResult};
use crate::models::Engineer;

/// Default rotation block length in weeks.
pub const DEFAULT_ROTATION_PERIOD_WEEKS: u32 = 2;

/// Upper bound on the number of weeks a single schedule request may cover.
pub const MAX_SCHEDULE_WEEKS: u32 = 104;

/// How far around "today" swap requests may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingHorizon {
    /// Whole weeks before the current week that remain swappable.
    pub weeks_back: u32,
    /// Whole weeks after the current week that are swappable.
    pub weeks_forward: u32,
}

impl Default for SchedulingHorizon {
    fn default() -> Self {
        Self {
            weeks_back: 4,
            weeks_forward: 52,
        }
    }
}

/// Team file structure (`team.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TeamFile {
    /// Anchor date; the Monday of its week is rotation week zero.
    pub rotation_start: NaiveDate,
    /// Weeks a day-off assignment is held before advancing.
    #[serde(default = "default_period")]
    pub rotation_period_weeks: u32,
    /// Whether a weekly on-call engineer is selected.
    #[serde(default = "default_true")]
    pub on_call_enabled: bool,
    /// Swap request horizon.
    #[serde(default)]
    pub horizon: SchedulingHorizon,
    /// Company-wide days off, treated as holidays for every region.
    #[serde(default)]
    pub company_days_off: Vec<NaiveDate>,
    /// The roster, in rotation order.
    pub engineers: Vec<Engineer>,
}

fn default_period() -> u32 {
    DEFAULT_ROTATION_PERIOD_WEEKS
}

fn default_true() -> bool {
    true
}

/// The validated team configuration for a scheduling run.
///
/// Roster order matters: it is the rotation tie-break and the on-call order.
/// A `TeamConfig` can only be built through [`TeamConfig::new`] (or the
/// loader), so every instance satisfies team size ≥ 2, a positive rotation
/// period, and unique names and letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamConfig {
    engineers: Vec<Engineer>,
    rotation_period_weeks: u32,
    rotation_start: NaiveDate,
    on_call_enabled: bool,
    horizon: SchedulingHorizon,
    company_days_off: Vec<NaiveDate>,
}

impl TeamConfig {
    /// Creates a validated configuration with default on-call and horizon settings.
    ///
    /// # Example
    ///
    /// ```
    /// use rotation_engine::config::TeamConfig;
    /// use rotation_engine::models::Engineer;
    /// use chrono::NaiveDate;
    ///
    /// let config = TeamConfig::new(
    ///     vec![
    ///         Engineer::new("Alex", 'A', "US", Some("CA")),
    ///         Engineer::new("Blake", 'B', "US", Some("CA")),
    ///     ],
    ///     2,
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(config.team_size(), 2);
    ///
    /// let invalid = TeamConfig::new(vec![], 2, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        engineers: Vec<Engineer>,
        rotation_period_weeks: u32,
        rotation_start: NaiveDate,
    ) -> EngineResult<Self> {
        let config = Self {
            engineers,
            rotation_period_weeks,
            rotation_start,
            on_call_enabled: true,
            horizon: SchedulingHorizon::default(),
            company_days_off: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from a parsed team file.
    pub fn from_file(file: TeamFile) -> EngineResult<Self> {
        let config = Self {
            engineers: file.engineers,
            rotation_period_weeks: file.rotation_period_weeks,
            rotation_start: file.rotation_start,
            on_call_enabled: file.on_call_enabled,
            horizon: file.horizon,
            company_days_off: file.company_days_off,
        };
        config.validate()?;
        Ok(config)
    }

    /// The six-engineer demo roster anchored on 2024-01-01.
    pub fn default_team() -> Self {
        let engineers = [
            ("Alex", 'A'),
            ("Blake", 'B'),
            ("Casey", 'C'),
            ("Dana", 'D'),
            ("Evan", 'E'),
            ("Fiona", 'F'),
        ]
        .into_iter()
        .map(|(name, letter)| Engineer::new(name, letter, "US", Some("CA")))
        .collect();

        Self {
            engineers,
            rotation_period_weeks: DEFAULT_ROTATION_PERIOD_WEEKS,
            rotation_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            on_call_enabled: true,
            horizon: SchedulingHorizon::default(),
            company_days_off: Vec::new(),
        }
    }

    /// Returns a copy with on-call selection switched on or off.
    pub fn with_on_call(mut self, enabled: bool) -> Self {
        self.on_call_enabled = enabled;
        self
    }

    /// Returns a copy with a different swap horizon.
    pub fn with_horizon(mut self, horizon: SchedulingHorizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Returns a copy with company-wide days off.
    pub fn with_company_days_off(mut self, dates: Vec<NaiveDate>) -> Self {
        self.company_days_off = dates;
        self
    }

    fn validate(&self) -> EngineResult<()> {
        if self.engineers.len() < 2 {
            return Err(EngineError::ConfigInvalid {
                message: format!(
                    "team needs at least 2 engineers, found {}",
                    self.engineers.len()
                ),
            });
        }
        if self.rotation_period_weeks == 0 {
            return Err(EngineError::ConfigInvalid {
                message: "rotation period must be at least one week".to_string(),
            });
        }
        if checked_week_span(self.rotation_start, 1).is_none() {
            return Err(EngineError::ConfigInvalid {
                message: format!(
                    "rotation start {} has no complete workweek in the calendar",
                    self.rotation_start
                ),
            });
        }

        let mut names = HashSet::new();
        let mut letters = HashSet::new();
        for engineer in &self.engineers {
            if engineer.name.trim().is_empty() {
                return Err(EngineError::ConfigInvalid {
                    message: "engineer names cannot be empty".to_string(),
                });
            }
            if !names.insert(engineer.name.as_str()) {
                return Err(EngineError::ConfigInvalid {
                    message: format!("duplicate engineer name '{}'", engineer.name),
                });
            }
            if !letters.insert(engineer.letter) {
                return Err(EngineError::ConfigInvalid {
                    message: format!("duplicate rotation letter '{}'", engineer.letter),
                });
            }
        }
        Ok(())
    }

    /// Returns the roster in rotation order.
    pub fn engineers(&self) -> &[Engineer] {
        &self.engineers
    }

    /// Returns the number of engineers.
    pub fn team_size(&self) -> usize {
        self.engineers.len()
    }

    /// Returns the rotation block length in weeks.
    pub fn rotation_period_weeks(&self) -> u32 {
        self.rotation_period_weeks
    }

    /// Returns the rotation anchor date.
    pub fn rotation_start(&self) -> NaiveDate {
        self.rotation_start
    }

    /// Returns whether weekly on-call selection is enabled.
    pub fn on_call_enabled(&self) -> bool {
        self.on_call_enabled
    }

    /// Returns the swap request horizon.
    pub fn horizon(&self) -> SchedulingHorizon {
        self.horizon
    }

    /// Returns the company-wide days off.
    pub fn company_days_off(&self) -> &[NaiveDate] {
        &self.company_days_off
    }

    /// Looks up an engineer by exact name.
    pub fn engineer(&self, name: &str) -> Option<&Engineer> {
        self.engineers.iter().find(|e| e.name == name)
    }

    /// Returns the roster position of an engineer.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.engineers.iter().position(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn engineers(names: &[(&str, char)]) -> Vec<Engineer> {
        names
            .iter()
            .map(|(n, l)| Engineer::new(n, *l, "US", None))
            .collect()
    }

    #[test]
    fn test_single_engineer_is_invalid() {
        let result = TeamConfig::new(engineers(&[("Alex", 'A')]), 2, anchor());
        assert!(matches!(result, Err(EngineError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_zero_period_is_invalid() {
        let result = TeamConfig::new(engineers(&[("Alex", 'A'), ("Blake", 'B')]), 0, anchor());
        match result {
            Err(EngineError::ConfigInvalid { message }) => {
                assert!(message.contains("rotation period"));
            }
            other => panic!("Expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_anchor_at_calendar_edge_is_invalid() {
        let result = TeamConfig::new(
            engineers(&[("Alex", 'A'), ("Blake", 'B')]),
            2,
            NaiveDate::MAX,
        );
        assert!(matches!(result, Err(EngineError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_duplicate_letter_is_invalid() {
        let result = TeamConfig::new(engineers(&[("Alex", 'A'), ("Avery", 'A')]), 2, anchor());
        match result {
            Err(EngineError::ConfigInvalid { message }) => {
                assert!(message.contains("letter 'A'"));
            }
            other => panic!("Expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_name_is_invalid() {
        let result = TeamConfig::new(engineers(&[("Alex", 'A'), ("Alex", 'B')]), 2, anchor());
        assert!(matches!(result, Err(EngineError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_default_team_is_valid() {
        let team = TeamConfig::default_team();
        assert!(team.validate().is_ok());
        assert_eq!(team.team_size(), 6);
        assert_eq!(team.ordinal("Casey"), Some(2));
        assert_eq!(team.rotation_period_weeks(), 2);
        assert!(team.on_call_enabled());
    }

    #[test]
    fn test_team_file_defaults() {
        let file: TeamFile = serde_yaml::from_str(
            "rotation_start: 2024-01-01\nengineers:\n  - {name: Alex, letter: A}\n  - {name: Blake, letter: B}\n",
        )
        .unwrap();
        let config = TeamConfig::from_file(file).unwrap();
        assert_eq!(config.rotation_period_weeks(), DEFAULT_ROTATION_PERIOD_WEEKS);
        assert!(config.on_call_enabled());
        assert_eq!(config.horizon(), SchedulingHorizon::default());
        assert!(config.company_days_off().is_empty());
    }
}

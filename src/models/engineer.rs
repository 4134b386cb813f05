//! Engineer model and holiday region.
//!
//! This module defines the [`Engineer`] roster entry and the [`Region`] used
//! to resolve which statutory holidays an engineer observes.

use serde::{Deserialize, Serialize};

/// A holiday region: a country plus an optional state or province.
///
/// Country and subdivision codes are stored upper-cased so that `"us"` and
/// `"US"` resolve to the same holiday set.
///
/// # Example
///
/// ```
/// use rotation_engine::models::Region;
///
/// let region = Region::new("ca", Some("on"));
/// assert_eq!(region.country(), "CA");
/// assert_eq!(region.subdivision(), Some("ON"));
/// assert_eq!(region.to_string(), "CA-ON");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    country: String,
    subdivision: Option<String>,
}

impl Region {
    /// Creates a region from a country code and optional subdivision code.
    pub fn new(country: &str, subdivision: Option<&str>) -> Self {
        Self {
            country: country.trim().to_uppercase(),
            subdivision: subdivision
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Returns the upper-cased country code.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the upper-cased state or province code, if any.
    pub fn subdivision(&self) -> Option<&str> {
        self.subdivision.as_deref()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subdivision {
            Some(sub) => write!(f, "{}-{}", self.country, sub),
            None => write!(f, "{}", self.country),
        }
    }
}

/// A member of the rotating team.
///
/// The field names match the persisted team file (`country` and
/// `state_province` rather than a nested region) so roster files stay flat.
///
/// # Example
///
/// ```
/// use rotation_engine::models::Engineer;
///
/// let engineer = Engineer::new("Alex", 'A', "US", Some("CA"));
/// assert_eq!(engineer.region().to_string(), "US-CA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engineer {
    /// Unique display name.
    pub name: String,
    /// Single-character rotation letter shown in compact schedule views.
    pub letter: char,
    /// Country code used for holiday resolution.
    #[serde(default = "default_country")]
    pub country: String,
    /// State or province code used for holiday resolution.
    #[serde(default)]
    pub state_province: Option<String>,
}

fn default_country() -> String {
    "US".to_string()
}

impl Engineer {
    /// Creates a new engineer.
    pub fn new(name: &str, letter: char, country: &str, state_province: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            letter,
            country: country.to_string(),
            state_province: state_province.map(str::to_string),
        }
    }

    /// Returns the holiday region for this engineer.
    pub fn region(&self) -> Region {
        Region::new(&self.country, self.state_province.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_normalizes_case_and_blank_subdivision() {
        let region = Region::new(" us ", Some("  "));
        assert_eq!(region.country(), "US");
        assert_eq!(region.subdivision(), None);
        assert_eq!(region.to_string(), "US");
    }

    #[test]
    fn test_regions_compare_case_insensitively_after_construction() {
        assert_eq!(Region::new("ca", Some("qc")), Region::new("CA", Some("QC")));
    }

    #[test]
    fn test_engineer_deserializes_with_default_country() {
        let engineer: Engineer = serde_yaml::from_str("name: Dana\nletter: D\n").unwrap();
        assert_eq!(engineer.country, "US");
        assert_eq!(engineer.state_province, None);
        assert_eq!(engineer.region(), Region::new("US", None));
    }
}

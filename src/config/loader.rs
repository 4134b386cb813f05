//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading team
//! configurations and PTO records from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PtoRecord;

use super::types::{TeamConfig, TeamFile};

/// Loads and provides access to team configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── team.yaml   # Roster, rotation anchor and period, horizon
/// └── pto.yaml    # Optional PTO records
/// ```
///
/// # Example
///
/// ```no_run
/// use rotation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Team size: {}", loader.team().team_size());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    team: TeamConfig,
    pto: Vec<PtoRecord>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `team.yaml` is missing
    /// - `ConfigParseError` if a file is not valid YAML for its schema
    /// - `ConfigInvalid` if the roster or rotation settings are invalid
    pub fn load(dir: impl AsRef<Path>) -> EngineResult<Self> {
        let path = dir.as_ref();

        let team_file = Self::load_yaml::<TeamFile>(&path.join("team.yaml"))?;
        let team = TeamConfig::from_file(team_file)?;

        let pto_path = path.join("pto.yaml");
        let pto = if pto_path.exists() {
            Self::load_yaml::<Vec<PtoRecord>>(&pto_path)?
        } else {
            Vec::new()
        };

        for record in &pto {
            if team.engineer(&record.engineer).is_none() {
                return Err(EngineError::ConfigInvalid {
                    message: format!("PTO record for unknown engineer '{}'", record.engineer),
                });
            }
        }

        debug!(
            dir = %path.display(),
            engineers = team.team_size(),
            pto_records = pto.len(),
            "Loaded team configuration"
        );

        Ok(Self { team, pto })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the validated team configuration.
    pub fn team(&self) -> &TeamConfig {
        &self.team
    }

    /// Returns the loaded PTO records.
    pub fn pto(&self) -> &[PtoRecord] {
        &self.pto
    }

    /// Consumes the loader, returning the team and PTO records.
    pub fn into_parts(self) -> (TeamConfig, Vec<PtoRecord>) {
        (self.team, self.pto)
    }
}

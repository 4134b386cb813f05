//! Configuration loading and management for the rotation engine.
//!
//! This module provides functionality to load the team roster, rotation
//! settings and PTO records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use rotation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rotation starts {}", config.team().rotation_start());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_ROTATION_PERIOD_WEEKS, MAX_SCHEDULE_WEEKS, SchedulingHorizon, TeamConfig, TeamFile,
};

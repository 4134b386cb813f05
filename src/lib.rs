//! Rotation and swap engine for 4x10 engineering teams
//!
//! This crate generates a fair, repeating day-off rotation for a team working
//! four ten-hour days, overlays the weekly on-call engineer, applies approved
//! swaps, folds in PTO and statutory holidays, and derives daily coverage.
//! Tuesday is the team's required day and is never rotated off.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod holidays;
pub mod ledger;
pub mod models;

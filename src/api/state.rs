//! Application state for the rotation engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::engine::RotationEngine;

/// Shared application state.
///
/// Holds the engine behind an `Arc`; the swap ledger inside it serializes
/// its own writes, so handlers need no further locking.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RotationEngine>,
    today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: RotationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            today: None,
        }
    }

    /// Pins the date used for swap horizon checks instead of the UTC clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the engine.
    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    /// The date swap requests are validated against.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

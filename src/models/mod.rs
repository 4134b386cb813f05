//! Core data models for the rotation engine.
//!
//! This module contains the plain data records consumed and produced by the
//! engine: roster entries, derived day assignments, swap requests, PTO and
//! holiday sets.

mod assignment;
mod engineer;
mod holiday;
mod pto;
mod swap;

pub use assignment::{
    AdjustmentRule, DailyCoverage, DayAssignment, EngineerWeek, HourAdjustment, ScheduledDay,
    WeekSchedule, WeeklyHours,
};
pub use engineer::{Engineer, Region};
pub use holiday::HolidaySet;
pub use pto::{PtoRecord, PtoSpan};
pub use swap::{Approver, Decision, Role, SwapRequest, SwapStatus};

//! The rotation engine facade.
//!
//! [`RotationEngine`] ties the pure schedule pipeline to its collaborators:
//! the team configuration, PTO records, a holiday provider and the swap
//! ledger. Schedule queries re-derive everything from these inputs on every
//! call; only the ledger holds mutable state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculation::{
    FairnessReport, RegionHolidays, ScheduleInputs, checked_week_span, coverage_between,
    fairness_report, resolve_week, resolve_weeks, schedule_rows,
};
use crate::config::{ConfigLoader, MAX_SCHEDULE_WEEKS, TeamConfig};
use crate::error::{EngineError, EngineResult};
use crate::holidays::{HolidayProvider, LayeredHolidays, StaticHolidays, StatutoryHolidays};
use crate::ledger::{SwapLedger, SwapSubmission};
use crate::models::{
    Approver, DailyCoverage, Decision, PtoRecord, Region, ScheduledDay, SwapRequest, SwapStatus,
    WeekSchedule,
};

/// Schedule generation, swap workflow and coverage for one team.
///
/// # Example
///
/// ```
/// use rotation_engine::config::TeamConfig;
/// use rotation_engine::engine::RotationEngine;
/// use chrono::NaiveDate;
///
/// let engine = RotationEngine::new(TeamConfig::default_team());
/// let rows = engine
///     .generate_schedule(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 2)
///     .unwrap();
/// assert_eq!(rows.len(), 2 * 5 * 6);
/// ```
pub struct RotationEngine {
    config: TeamConfig,
    pto: Vec<PtoRecord>,
    holidays: Box<dyn HolidayProvider>,
    ledger: SwapLedger,
}

impl RotationEngine {
    /// Creates an engine with statutory holidays, the configured company days
    /// off, no PTO and an empty in-memory ledger.
    pub fn new(config: TeamConfig) -> Self {
        let holidays = Self::with_company_days(&config, StatutoryHolidays);
        Self {
            config,
            pto: Vec::new(),
            holidays,
            ledger: SwapLedger::in_memory(),
        }
    }

    /// Creates an engine from a loaded configuration directory.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        let (config, pto) = loader.into_parts();
        Self::new(config).with_pto(pto)
    }

    /// Replaces the PTO records.
    pub fn with_pto(mut self, pto: Vec<PtoRecord>) -> Self {
        self.pto = pto;
        self
    }

    /// Replaces the statutory holiday source. Company days off still apply.
    pub fn with_holidays(mut self, provider: impl HolidayProvider + 'static) -> Self {
        self.holidays = Self::with_company_days(&self.config, provider);
        self
    }

    /// Replaces the swap ledger.
    pub fn with_ledger(mut self, ledger: SwapLedger) -> Self {
        self.ledger = ledger;
        self
    }

    fn with_company_days(
        config: &TeamConfig,
        provider: impl HolidayProvider + 'static,
    ) -> Box<dyn HolidayProvider> {
        Box::new(
            LayeredHolidays::new()
                .with(provider)
                .with(StaticHolidays::company_days_off(config.company_days_off())),
        )
    }

    /// Returns the team configuration.
    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    /// Returns the loaded PTO records.
    pub fn pto(&self) -> &[PtoRecord] {
        &self.pto
    }

    /// Returns the swap ledger.
    pub fn ledger(&self) -> &SwapLedger {
        &self.ledger
    }

    /// Resolves holiday sets for every roster region across the years that
    /// `first..=last` touches.
    pub fn holiday_sets(&self, first: NaiveDate, last: NaiveDate) -> RegionHolidays {
        let regions: BTreeSet<Region> = self.config.engineers().iter().map(|e| e.region()).collect();
        regions
            .into_iter()
            .map(|region| {
                let set = self
                    .holidays
                    .holidays_between(&region, first.year(), last.year());
                (region, set)
            })
            .collect()
    }

    /// Fully resolves the week containing `date`.
    ///
    /// Returns `InvalidDate` if the week is not fully representable.
    pub fn week_schedule(&self, date: NaiveDate) -> EngineResult<WeekSchedule> {
        let (monday, friday) = schedule_span(date, 1)?;
        let holidays = self.holiday_sets(monday, friday);
        let swaps = self.ledger.approved();
        Ok(resolve_week(
            &self.config,
            monday,
            &ScheduleInputs::new(&swaps, &self.pto, &holidays),
        ))
    }

    /// Resolves consecutive weeks starting with the week of `start`.
    ///
    /// The week count is clamped to [`MAX_SCHEDULE_WEEKS`]. Returns
    /// `InvalidDate` if the clamped range runs off the calendar.
    pub fn weeks(&self, start: NaiveDate, weeks: u32) -> EngineResult<Vec<WeekSchedule>> {
        let weeks = clamp_weeks(weeks);
        if weeks == 0 {
            return Ok(Vec::new());
        }
        let (first, last) = schedule_span(start, weeks)?;
        let holidays = self.holiday_sets(first, last);
        let swaps = self.ledger.approved();
        debug!(start = %first, weeks, "Resolving schedule");
        Ok(resolve_weeks(
            &self.config,
            first,
            weeks,
            &ScheduleInputs::new(&swaps, &self.pto, &holidays),
        ))
    }

    /// Returns (date, engineer, assignment) rows for `weeks` weeks starting
    /// with the week of `start`, date-major in roster order.
    pub fn generate_schedule(
        &self,
        start: NaiveDate,
        weeks: u32,
    ) -> EngineResult<Vec<ScheduledDay>> {
        Ok(schedule_rows(&self.weeks(start, weeks)?))
    }

    /// Submits a swap request, using today's UTC date for the horizon check.
    pub fn request_swap(
        &self,
        requester: &str,
        target: &str,
        date: NaiveDate,
        reason: &str,
    ) -> EngineResult<SwapRequest> {
        self.request_swap_as_of(
            SwapSubmission::new(requester, target, date, reason),
            Utc::now().date_naive(),
        )
    }

    /// Submits a swap request with an explicit "today" for the horizon check.
    pub fn request_swap_as_of(
        &self,
        submission: SwapSubmission,
        today: NaiveDate,
    ) -> EngineResult<SwapRequest> {
        self.ledger
            .submit(&self.config, self.holidays.as_ref(), submission, today)
    }

    /// Approves or rejects a pending swap request.
    pub fn decide_swap(
        &self,
        id: Uuid,
        approver: &Approver,
        decision: Decision,
    ) -> EngineResult<SwapRequest> {
        self.ledger.decide(&self.config, id, approver, decision)
    }

    /// Lists swap requests in creation order, optionally filtered by status.
    pub fn list_swaps(&self, status: Option<SwapStatus>) -> Vec<SwapRequest> {
        self.ledger.list(status)
    }

    /// Returns coverage for every workday in `start..=end`.
    ///
    /// An empty map is returned when `end` precedes `start`. Ranges touching
    /// more than [`MAX_SCHEDULE_WEEKS`] weeks are rejected with
    /// `InvalidDate` rather than truncated.
    pub fn coverage(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<BTreeMap<NaiveDate, DailyCoverage>> {
        if end < start {
            return Ok(BTreeMap::new());
        }
        let (first, _) = schedule_span(start, 1)?;
        let (last, _) = schedule_span(end, 1)?;
        let span = (last - first).num_weeks() + 1;
        if span > i64::from(MAX_SCHEDULE_WEEKS) {
            return Err(EngineError::InvalidDate {
                date: end,
                message: format!(
                    "coverage range spans {} weeks, maximum is {}",
                    span, MAX_SCHEDULE_WEEKS
                ),
            });
        }
        let weeks = u32::try_from(span).unwrap_or(MAX_SCHEDULE_WEEKS);
        Ok(coverage_between(&self.weeks(start, weeks)?, start, end))
    }

    /// Reports rotation fairness over `weeks` weeks starting with the week of `start`.
    ///
    /// The week count is clamped to [`MAX_SCHEDULE_WEEKS`].
    pub fn fairness_report(&self, start: NaiveDate, weeks: u32) -> EngineResult<FairnessReport> {
        let weeks = clamp_weeks(weeks);
        schedule_span(start, weeks)?;
        Ok(fairness_report(
            &self.config,
            start,
            weeks,
            &self.ledger.list(None),
        ))
    }
}

impl std::fmt::Debug for RotationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationEngine")
            .field("config", &self.config)
            .field("pto", &self.pto.len())
            .field("ledger", &self.ledger)
            .finish()
    }
}

fn schedule_span(start: NaiveDate, weeks: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    checked_week_span(start, weeks).ok_or_else(|| EngineError::InvalidDate {
        date: start,
        message: "schedule range falls outside the supported calendar".to_string(),
    })
}

fn clamp_weeks(weeks: u32) -> u32 {
    if weeks > MAX_SCHEDULE_WEEKS {
        warn!(
            requested = weeks,
            max = MAX_SCHEDULE_WEEKS,
            "Schedule request exceeds maximum, clamping"
        );
        MAX_SCHEDULE_WEEKS
    } else {
        weeks
    }
}

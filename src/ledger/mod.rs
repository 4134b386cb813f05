//! Swap validator and ledger.
//!
//! The [`SwapLedger`] is the only mutable state in the engine. Every
//! mutation takes a single write lock, so concurrent decisions on the same
//! request are serialized and exactly one of them wins. A change is saved to
//! the [`SwapStore`] before it is committed to memory; if the save fails the
//! ledger is left unchanged.

mod store;
mod validation;

use std::sync::{PoisonError, RwLock};

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::TeamConfig;
use crate::error::{EngineError, EngineResult};
use crate::holidays::HolidayProvider;
use crate::models::{Approver, Decision, Role, SwapRequest, SwapStatus};

pub use store::{JsonFileSwapStore, MemorySwapStore, SwapStore};
pub use validation::{horizon_bounds, validate_swap};

use validation::check_exchange;

/// Capability check for deciding swap requests.
pub trait ApprovalPolicy: Send + Sync {
    /// Returns true if the approver may approve or reject swaps.
    fn has_approval_rights(&self, approver: &Approver) -> bool;
}

impl<F> ApprovalPolicy for F
where
    F: Fn(&Approver) -> bool + Send + Sync,
{
    fn has_approval_rights(&self, approver: &Approver) -> bool {
        self(approver)
    }
}

/// Grants approval rights to admins and managers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleBasedApproval;

impl ApprovalPolicy for RoleBasedApproval {
    fn has_approval_rights(&self, approver: &Approver) -> bool {
        matches!(approver.role, Role::Admin | Role::Manager)
    }
}

/// A swap request as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapSubmission {
    /// The engineer asking for the swap.
    pub requester: String,
    /// The engineer to swap with.
    pub target: String,
    /// The date to swap.
    pub date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
}

impl SwapSubmission {
    /// Creates a submission.
    pub fn new(requester: &str, target: &str, date: NaiveDate, reason: &str) -> Self {
        Self {
            requester: requester.to_string(),
            target: target.to_string(),
            date,
            reason: reason.to_string(),
        }
    }
}

/// The authoritative list of swap requests.
///
/// # Example
///
/// ```
/// use rotation_engine::config::TeamConfig;
/// use rotation_engine::holidays::StaticHolidays;
/// use rotation_engine::ledger::{SwapLedger, SwapSubmission};
/// use rotation_engine::models::{Approver, Decision, Role, SwapStatus};
/// use chrono::NaiveDate;
///
/// let ledger = SwapLedger::in_memory();
/// let config = TeamConfig::default_team();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
///
/// let swap = ledger
///     .submit(&config, &StaticHolidays::new(), SwapSubmission::new("Alex", "Blake", date, "dentist"), today)
///     .unwrap();
/// assert_eq!(swap.status, SwapStatus::Pending);
///
/// let decided = ledger
///     .decide(&config, swap.id, &Approver::new("morgan", Role::Manager), Decision::Approve)
///     .unwrap();
/// assert_eq!(decided.status, SwapStatus::Approved);
/// assert_eq!(ledger.approved().len(), 1);
/// ```
pub struct SwapLedger {
    swaps: RwLock<Vec<SwapRequest>>,
    store: Box<dyn SwapStore>,
    policy: Box<dyn ApprovalPolicy>,
}

impl SwapLedger {
    /// Rehydrates a ledger from a store.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    pub fn new(
        store: impl SwapStore + 'static,
        policy: impl ApprovalPolicy + 'static,
    ) -> EngineResult<Self> {
        let swaps = store.load()?;
        info!(swaps = swaps.len(), "Loaded swap ledger");
        Ok(Self {
            swaps: RwLock::new(swaps),
            store: Box::new(store),
            policy: Box::new(policy),
        })
    }

    /// An empty ledger with an in-memory store and role-based approval.
    pub fn in_memory() -> Self {
        Self {
            swaps: RwLock::new(Vec::new()),
            store: Box::new(MemorySwapStore::new()),
            policy: Box::new(RoleBasedApproval),
        }
    }

    /// Validates and records a new pending swap request.
    ///
    /// No schedule changes until the request is approved.
    ///
    /// # Errors
    ///
    /// `InvalidDate`, `UnknownEngineer`, `RequiredDayViolation` or
    /// `SameSchedule` from validation; `Storage` if the store rejects the write.
    pub fn submit(
        &self,
        config: &TeamConfig,
        holidays: &dyn HolidayProvider,
        submission: SwapSubmission,
        today: NaiveDate,
    ) -> EngineResult<SwapRequest> {
        let mut swaps = self.swaps.write().unwrap_or_else(PoisonError::into_inner);

        let approved = approved_in_decision_order(&swaps);
        validate_swap(
            config,
            holidays,
            &approved,
            &submission.requester,
            &submission.target,
            submission.date,
            today,
        )?;

        let swap = SwapRequest::pending(
            &submission.requester,
            &submission.target,
            submission.date,
            &submission.reason,
        );
        let mut next = swaps.clone();
        next.push(swap.clone());
        self.store.save(&next)?;
        *swaps = next;

        info!(
            swap_id = %swap.id,
            requester = %swap.requester,
            target = %swap.target,
            date = %swap.date,
            "Swap request submitted"
        );
        Ok(swap)
    }

    /// Approves or rejects a pending swap request.
    ///
    /// Approval re-checks the exchange against the swaps approved so far,
    /// since another request for the same engineers and date may have been
    /// approved after this one was submitted.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the approver lacks approval rights
    /// - `NotFound` if no request has this id
    /// - `AlreadyDecided` if the request is no longer pending
    /// - `SameSchedule` if approving would no longer be a one-for-one
    ///   exchange; the request stays pending
    /// - `Storage` if the store rejects the write
    pub fn decide(
        &self,
        config: &TeamConfig,
        id: Uuid,
        approver: &Approver,
        decision: Decision,
    ) -> EngineResult<SwapRequest> {
        if !self.policy.has_approval_rights(approver) {
            return Err(EngineError::Forbidden {
                username: approver.username.clone(),
            });
        }

        let mut swaps = self.swaps.write().unwrap_or_else(PoisonError::into_inner);
        let position = swaps
            .iter()
            .position(|s| s.id == id)
            .ok_or(EngineError::NotFound { id })?;

        let current = &swaps[position];
        if current.status.is_terminal() {
            return Err(EngineError::AlreadyDecided {
                id,
                status: current.status.to_string(),
            });
        }
        if matches!(decision, Decision::Approve) {
            let approved = approved_in_decision_order(&swaps);
            check_exchange(
                config,
                &approved,
                &current.requester,
                &current.target,
                current.date,
            )?;
        }

        let mut next = swaps.clone();
        let decided = &mut next[position];
        decided.status = decision.status();
        decided.approver = Some(approver.username.clone());
        decided.decided_at = Some(Utc::now());
        let decided = decided.clone();

        self.store.save(&next)?;
        *swaps = next;

        info!(
            swap_id = %decided.id,
            status = %decided.status,
            approver = %approver.username,
            "Swap request decided"
        );
        Ok(decided)
    }

    /// Returns swap requests in creation order, optionally filtered by status.
    pub fn list(&self, status: Option<SwapStatus>) -> Vec<SwapRequest> {
        self.swaps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect()
    }

    /// Returns one swap request by id.
    pub fn get(&self, id: Uuid) -> Option<SwapRequest> {
        self.swaps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Returns approved swaps in the order they were decided.
    pub fn approved(&self) -> Vec<SwapRequest> {
        approved_in_decision_order(&self.swaps.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl std::fmt::Debug for SwapLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .swaps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("SwapLedger").field("swaps", &count).finish()
    }
}

fn approved_in_decision_order(swaps: &[SwapRequest]) -> Vec<SwapRequest> {
    let mut approved: Vec<SwapRequest> = swaps
        .iter()
        .filter(|s| s.status == SwapStatus::Approved)
        .cloned()
        .collect();
    // Stable: equal timestamps keep creation order.
    approved.sort_by_key(|s| s.decided_at);
    approved
}

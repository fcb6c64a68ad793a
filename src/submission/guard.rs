//! The asynchronous half of a submission check.
//!
//! After local validation, adjustments and leave requests are checked against
//! the employee's other requests: an adjustment may not touch a date that
//! already has an active full-day leave request, and a leave request may not
//! cover a date that already has an active adjustment request. The other list
//! is fetched exactly once per attempt. If it cannot be fetched the
//! submission is blocked; there is no retry and no silent pass.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculation::{find_conflicting_dates, format_dates_for_display};
use crate::config::LaborRules;
use crate::error::{EngineError, EngineResult, SubmissionError};
use crate::models::{DateRange, ExistingRequest, LeaveEntitlement, SessionContext};

use super::drafts::{
    AdjustmentDraft, AdjustmentPayload, LeaveDraft, LeavePayload, ValidatedAdjustment,
    ValidatedLeave, ValidatedWorkPattern, WorkPatternDraft, WorkPatternPayload,
};
use super::validation::{validate_adjustment, validate_leave, validate_work_pattern};

/// Where the employee's other requests come from.
///
/// Implementations return the already-normalized view; see
/// [`normalize_leave_requests`](crate::models::normalize_leave_requests) and
/// [`normalize_adjustment_requests`](crate::models::normalize_adjustment_requests).
pub trait RequestSource {
    /// The employee's leave requests.
    fn leave_requests(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<ExistingRequest>>> + Send;

    /// The employee's time adjustment requests.
    fn adjustment_requests(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<ExistingRequest>>> + Send;
}

/// An in-memory [`RequestSource`].
///
/// A list left as `None` behaves like an unreachable backend.
#[derive(Debug, Clone, Default)]
pub struct StaticRequestSource {
    /// Leave requests, if available.
    pub leave: Option<Vec<ExistingRequest>>,
    /// Adjustment requests, if available.
    pub adjustments: Option<Vec<ExistingRequest>>,
}

impl StaticRequestSource {
    /// A source with both lists available.
    pub fn new(leave: Vec<ExistingRequest>, adjustments: Vec<ExistingRequest>) -> Self {
        Self {
            leave: Some(leave),
            adjustments: Some(adjustments),
        }
    }
}

fn unavailable(source_name: &str) -> EngineError {
    EngineError::RequestFetchFailed {
        source_name: source_name.to_string(),
        message: "not available".to_string(),
    }
}

impl RequestSource for StaticRequestSource {
    async fn leave_requests(&self, _employee_id: &str) -> EngineResult<Vec<ExistingRequest>> {
        self.leave.clone().ok_or_else(|| unavailable("leave requests"))
    }

    async fn adjustment_requests(
        &self,
        _employee_id: &str,
    ) -> EngineResult<Vec<ExistingRequest>> {
        self.adjustments
            .clone()
            .ok_or_else(|| unavailable("adjustment requests"))
    }
}

/// A submission that passed every check, with the body to send upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedSubmission<V, P> {
    /// The validated form.
    pub validated: V,
    /// The request body for the backend.
    pub payload: P,
}

/// Runs the full pre-submission check for each form.
#[derive(Debug, Clone)]
pub struct SubmissionGuard<S> {
    source: S,
    rules: LaborRules,
}

impl<S: RequestSource> SubmissionGuard<S> {
    /// Creates a guard over a request source and rule set.
    pub fn new(source: S, rules: LaborRules) -> Self {
        Self { source, rules }
    }

    /// The rules the guard validates against.
    pub fn rules(&self) -> &LaborRules {
        &self.rules
    }

    /// Checks a time adjustment.
    ///
    /// Validates the form, resolves the employee, then blocks the submission
    /// if any date from clock-in to clock-out has an active full-day leave
    /// request.
    ///
    /// # Example
    ///
    /// ```
    /// use kintai_core::config::LaborRules;
    /// use kintai_core::error::SubmissionError;
    /// use kintai_core::models::SessionContext;
    /// use kintai_core::submission::{AdjustmentDraft, StaticRequestSource, SubmissionGuard};
    ///
    /// # tokio_test_block(async {
    /// let guard = SubmissionGuard::new(StaticRequestSource::default(), LaborRules::default());
    /// let draft = AdjustmentDraft {
    ///     clock_in_date: Some("2024-03-05".to_string()),
    ///     clock_in_time: Some("09:00".to_string()),
    ///     clock_out_date: Some("2024-03-05".to_string()),
    ///     clock_out_time: Some("18:00".to_string()),
    ///     break_time: None,
    ///     reason: Some("打刻漏れ".to_string()),
    /// };
    ///
    /// // No leave list available: the check fails closed.
    /// let result = guard
    ///     .check_adjustment(&SessionContext::for_employee("E001"), &draft)
    ///     .await;
    /// assert_eq!(result.unwrap_err(), SubmissionError::LeaveCheckFailed);
    /// # });
    /// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
    /// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
    /// # }
    /// ```
    pub async fn check_adjustment(
        &self,
        ctx: &SessionContext,
        draft: &AdjustmentDraft,
    ) -> Result<CheckedSubmission<ValidatedAdjustment, AdjustmentPayload>, SubmissionError> {
        let validated = validate_adjustment(draft, &self.rules)?;
        let employee_id = ctx.employee_id()?;

        let leave = self
            .source
            .leave_requests(employee_id)
            .await
            .map_err(|error| {
                warn!(employee_id, error = %error, "Leave request fetch failed, blocking adjustment");
                SubmissionError::LeaveCheckFailed
            })?;

        let conflicts = conflicts_within(&validated.target_dates(), &leave);
        if !conflicts.is_empty() {
            info!(
                employee_id,
                conflict_count = conflicts.len(),
                "Adjustment blocked by leave request"
            );
            return Err(SubmissionError::LeaveConflict {
                dates: format_dates_for_display(&conflicts),
            });
        }

        debug!(employee_id, "Adjustment passed all checks");
        let payload = validated.to_payload(employee_id);
        Ok(CheckedSubmission { validated, payload })
    }

    /// Checks a leave request.
    ///
    /// Validates the form (including balance and grant coverage when the
    /// entitlement is known), resolves the employee, then blocks the
    /// submission if any requested date has an active adjustment request.
    pub async fn check_leave(
        &self,
        ctx: &SessionContext,
        draft: &LeaveDraft,
        entitlement: Option<&LeaveEntitlement>,
    ) -> Result<CheckedSubmission<ValidatedLeave, LeavePayload>, SubmissionError> {
        let validated = validate_leave(draft, entitlement, &self.rules)?;
        let employee_id = ctx.employee_id()?;

        let adjustments = self
            .source
            .adjustment_requests(employee_id)
            .await
            .map_err(|error| {
                warn!(employee_id, error = %error, "Adjustment request fetch failed, blocking leave");
                SubmissionError::AdjustmentCheckFailed
            })?;

        let conflicts = conflicts_within(&validated.range, &adjustments);
        if !conflicts.is_empty() {
            info!(
                employee_id,
                conflict_count = conflicts.len(),
                "Leave blocked by adjustment request"
            );
            return Err(SubmissionError::AdjustmentConflict {
                dates: format_dates_for_display(&conflicts),
            });
        }

        debug!(employee_id, "Leave request passed all checks");
        let payload = validated.to_payload(employee_id);
        Ok(CheckedSubmission { validated, payload })
    }

    /// Checks a work pattern change. No other requests are consulted.
    pub fn check_work_pattern(
        &self,
        ctx: &SessionContext,
        draft: &WorkPatternDraft,
    ) -> Result<CheckedSubmission<ValidatedWorkPattern, WorkPatternPayload>, SubmissionError> {
        let validated = validate_work_pattern(draft, &self.rules)?;
        let employee_id = ctx.employee_id()?;
        let payload = validated.to_payload(employee_id);
        Ok(CheckedSubmission { validated, payload })
    }
}

fn conflicts_within(range: &DateRange, existing: &[ExistingRequest]) -> Vec<NaiveDate> {
    let candidates: BTreeSet<_> = range.iter().collect();
    find_conflicting_dates(&candidates, existing)
}

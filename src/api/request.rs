//! Request types for the attendance rule API.
//!
//! Envelope fields are snake_case. Forms and upstream request lists nested
//! inside them keep the camelCase shape the attendance screens and the
//! backend already use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AdjustmentRequestRecord, ExistingRequest, LeaveEntitlement, LeaveRequestRecord, MinutesValue,
    RequestList,
};
use crate::submission::{AdjustmentDraft, LeaveDraft, WorkPatternDraft};

/// Request body for `POST /working-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingTimeRequest {
    /// Clock-in timestamp.
    pub clock_in: String,
    /// Clock-out timestamp.
    pub clock_out: String,
    /// Recorded break as a number of minutes or a duration string.
    #[serde(default)]
    pub break_minutes: Option<MinutesValue>,
}

/// Request body for `POST /breaks/required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredBreakRequest {
    /// Clocked minutes.
    pub total_minutes: i64,
}

/// Request body for `POST /breaks/check`: a break correction on an
/// existing attendance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEditRequest {
    /// The record's clock-in, if any.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// The record's clock-out, if any.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// The entered break, `H:MM`.
    pub break_time: String,
}

/// Request body for `POST /dates/expand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandDatesRequest {
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day; absent or blank means the start date.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Request body for `POST /conflicts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRequest {
    /// Dates the new request would occupy.
    pub candidate_dates: Vec<NaiveDate>,
    /// Normalized requests to check against.
    #[serde(default)]
    pub existing_requests: Vec<ExistingRequest>,
}

/// Request body for `POST /adjustments/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentCheckRequest {
    /// The submitting employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The adjustment form.
    pub adjustment: AdjustmentDraft,
    /// The employee's leave requests as returned by the backend. Absent means
    /// the list could not be fetched.
    #[serde(default)]
    pub leave_requests: Option<RequestList<LeaveRequestRecord>>,
}

/// Request body for `POST /leave/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCheckRequest {
    /// The submitting employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The leave form.
    pub leave: LeaveDraft,
    /// Remaining balance and grants, when known.
    #[serde(default)]
    pub entitlement: Option<LeaveEntitlement>,
    /// The employee's adjustment requests as returned by the backend. Absent
    /// means the list could not be fetched.
    #[serde(default)]
    pub adjustment_requests: Option<RequestList<AdjustmentRequestRecord>>,
}

/// Request body for `POST /work-patterns/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPatternCheckRequest {
    /// The submitting employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The work pattern form.
    pub pattern: WorkPatternDraft,
}

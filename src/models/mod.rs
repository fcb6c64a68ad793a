//! Core data models for the attendance rule engine.
//!
//! This module contains the value types used throughout the engine: clocked
//! spans, date ranges, raw minute values, leave kinds and the normalized view
//! of other requests used by the conflict checks.

mod audit;
mod context;
mod date_range;
mod leave;
mod minutes;
mod request;
mod time_span;

pub use audit::AuditStep;
pub use context::SessionContext;
pub use date_range::{DateRange, parse_calendar_date};
pub use leave::{LeaveEntitlement, LeaveGrant, LeaveTimeUnit, LeaveType};
pub use minutes::MinutesValue;
pub use request::{
    AdjustmentRequestRecord, ExistingRequest, LeaveRequestRecord, RequestList, RequestStatus,
    normalize_adjustment_requests, normalize_leave_requests,
};
pub use time_span::TimeSpan;

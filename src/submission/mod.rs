//! Pre-submission checks for the attendance request forms.
//!
//! Validation is split in two:
//!
//! - The `validate_*` functions are pure and check a
//!   single form against the labor rules, stopping at the first violated rule.
//! - [`SubmissionGuard`] runs validation, resolves the employee from the
//!   [`SessionContext`](crate::models::SessionContext), and checks the form
//!   against the employee's other requests fetched from a [`RequestSource`].
//!
//! Every rejection is a [`SubmissionError`](crate::error::SubmissionError)
//! whose message can be shown to the user as is.

mod drafts;
mod guard;
mod validation;

pub use drafts::{
    AdjustmentDraft, AdjustmentPayload, LeaveDraft, LeavePayload, ValidatedAdjustment,
    ValidatedBreakEdit, ValidatedLeave, ValidatedWorkPattern, WorkPatternDraft,
    WorkPatternPayload, parse_weekday, weekday_name,
};
pub use guard::{CheckedSubmission, RequestSource, StaticRequestSource, SubmissionGuard};
pub use validation::{
    validate_adjustment, validate_break_edit, validate_leave, validate_work_pattern,
};

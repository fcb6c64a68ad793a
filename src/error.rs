//! Error types for the attendance rule engine.
//!
//! Two families of errors live here:
//!
//! - [`EngineError`] covers malformed input and configuration problems raised by
//!   the pure calculation core.
//! - [`SubmissionError`] covers business-rule rejections raised while checking a
//!   request before it is submitted. Its `Display` output is the user-facing
//!   message shown on the attendance screens.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// The main error type for the calculation core.
///
/// # Example
///
/// ```
/// use kintai_core::error::EngineError;
///
/// let error = EngineError::InvalidDuration {
///     input: "8h30".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid duration '8h30': expected H:MM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A duration string was not of the `H:MM` form.
    #[error("Invalid duration '{input}': expected H:MM")]
    InvalidDuration {
        /// The rejected input.
        input: String,
    },

    /// A calendar date string could not be parsed.
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// A timestamp string could not be parsed.
    #[error("Invalid date-time '{input}'")]
    InvalidDateTime {
        /// The rejected input.
        input: String,
    },

    /// A time span whose end is not after its start.
    #[error("Invalid time span: end {end} is not after start {start}")]
    InvalidTimeSpan {
        /// Start of the span.
        start: NaiveDateTime,
        /// End of the span.
        end: NaiveDateTime,
    },

    /// A date range whose end is before its start.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// A date range longer than the configured cap.
    #[error("Date range of {days} days exceeds the limit of {max_days} days")]
    DateRangeTooLong {
        /// Number of days in the requested range.
        days: i64,
        /// The configured maximum.
        max_days: u32,
    },

    /// Fetching existing requests from the backend failed.
    #[error("Failed to fetch {source_name}: {message}")]
    RequestFetchFailed {
        /// Which list was being fetched (e.g. "leave requests").
        source_name: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// A rejected submission.
///
/// Every business rule has its own variant so that callers can both match on
/// the rule and show the message verbatim.
///
/// # Example
///
/// ```
/// use kintai_core::error::SubmissionError;
///
/// let error = SubmissionError::BreakBelowStatutoryMinimum {
///     threshold_hours: 8,
///     required_minutes: 60,
/// };
/// assert_eq!(error.to_string(), "実働8時間以上の場合、休憩時間は60分以上必要です");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// No employee id in the session.
    #[error("従業員IDが取得できません")]
    EmployeeIdUnavailable,

    /// Adjustment: clock-in date, clock-out date or reason missing.
    #[error("出勤日・退勤日・理由は必須です")]
    MissingAdjustmentFields,

    /// Adjustment: clock-in date not a valid date.
    #[error("有効な出勤日を入力してください")]
    InvalidClockInDate,

    /// Adjustment: one of the clock times missing.
    #[error("出勤時刻と退勤時刻は両方入力してください")]
    MissingClockTimes,

    /// Adjustment: date and time do not form a valid timestamp.
    #[error("有効な出勤・退勤日時を入力してください")]
    InvalidDateTime,

    /// Clock-out is not after clock-in.
    #[error("退勤日時は出勤日時より後に設定してください")]
    ClockOutNotAfterClockIn,

    /// The clocked span is longer than allowed.
    #[error("勤務時間が長すぎます（{max_hours}時間以内で入力してください）")]
    SpanTooLong {
        /// The configured maximum in hours.
        max_hours: u32,
    },

    /// Break input not in `H:MM` form.
    #[error("休憩時間はHH:MM形式で入力してください")]
    InvalidBreakFormat,

    /// Break longer than the clocked span.
    #[error("休憩時間が勤務時間を超えています")]
    BreakExceedsWorkingTime,

    /// Break shorter than the statutory minimum for the span.
    #[error("実働{threshold_hours}時間以上の場合、休憩時間は{required_minutes}分以上必要です")]
    BreakBelowStatutoryMinimum {
        /// Hours worked from which the tier applies.
        threshold_hours: u32,
        /// Minimum break minutes for the tier.
        required_minutes: u32,
    },

    /// Dashboard break edit shorter than the statutory minimum.
    #[error("休憩時間が法定通りではありません")]
    BreakNotStatutory,

    /// Break edit on a record without a usable clock-in/clock-out pair.
    #[error("勤務時間の取得に失敗しました。再読み込み後にお試しください")]
    AttendanceSpanUnavailable,

    /// Adjustment dates overlap an active leave request.
    #[error("対象日（{dates}）には有給申請が存在します。打刻修正するには、有給申請を取消してください。")]
    LeaveConflict {
        /// Conflicting dates formatted for display.
        dates: String,
    },

    /// Leave requests could not be fetched for the conflict check.
    #[error("有給申請状況の確認に失敗しました。時間をおいて再度お試しください。")]
    LeaveCheckFailed,

    /// Leave: start or end date missing.
    #[error("開始日・終了日の両方を指定してください")]
    MissingLeaveDates,

    /// A date field is not a valid date.
    #[error("有効な日付を入力してください")]
    InvalidDate,

    /// Leave: end date before start date.
    #[error("終了日は開始日以降の日付を選択してください")]
    EndDateBeforeStart,

    /// Leave: half days are only available for paid leave.
    #[error("半休は有休のみ選択できます")]
    HalfDayRequiresPaidLeave,

    /// Leave: half days cover a single date.
    #[error("半休は単日のみ申請できます")]
    HalfDaySingleDateOnly,

    /// Leave: paid leave needs a reason.
    #[error("有休の場合は理由を入力してください")]
    PaidLeaveReasonRequired,

    /// Requested period longer than the configured cap.
    #[error("申請期間が長すぎます（{max_days}日以内で指定してください）")]
    RequestPeriodTooLong {
        /// The configured maximum in days.
        max_days: u32,
    },

    /// Leave: not enough remaining days.
    #[error("申請日数（{requested}日）が{label}の残日数（{remaining}日）を超えています")]
    InsufficientBalance {
        /// Requested days.
        requested: String,
        /// Display label of the leave type.
        label: String,
        /// Remaining days.
        remaining: String,
    },

    /// Leave: a date is not covered by an active grant.
    #[error("選択した期間に有効な休暇付与がありません")]
    NoActiveGrant,

    /// Leave dates overlap an active adjustment request.
    #[error("対象日（{dates}）には打刻修正申請が存在します。休暇申請するには、打刻修正申請を取消してください。")]
    AdjustmentConflict {
        /// Conflicting dates formatted for display.
        dates: String,
    },

    /// Adjustment requests could not be fetched for the conflict check.
    #[error("打刻修正申請状況の確認に失敗しました。時間をおいて再度お試しください。")]
    AdjustmentCheckFailed,

    /// Work pattern: a required field missing.
    #[error("必須項目を入力してください。")]
    MissingPatternFields,

    /// Work pattern: end date before start date.
    #[error("終了日は開始日以降を指定してください。")]
    PatternEndBeforeStart,

    /// Work pattern: no weekday selected.
    #[error("勤務日を少なくとも1つ選択してください。")]
    NoWorkDaysSelected,

    /// Work pattern: start/end times unparseable.
    #[error("有効な勤務時間を入力してください。")]
    InvalidWorkingHours,

    /// Work pattern: end time not after start time.
    #[error("勤務時間が0分以下です。")]
    NonPositiveWorkingTime,
}

impl SubmissionError {
    /// A stable machine-readable code for the rejection.
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::EmployeeIdUnavailable => "EMPLOYEE_ID_UNAVAILABLE",
            SubmissionError::MissingAdjustmentFields
            | SubmissionError::MissingClockTimes
            | SubmissionError::MissingLeaveDates
            | SubmissionError::MissingPatternFields => "MISSING_FIELD",
            SubmissionError::InvalidClockInDate
            | SubmissionError::InvalidDateTime
            | SubmissionError::InvalidDate
            | SubmissionError::InvalidWorkingHours => "INVALID_INPUT",
            SubmissionError::ClockOutNotAfterClockIn
            | SubmissionError::EndDateBeforeStart
            | SubmissionError::PatternEndBeforeStart
            | SubmissionError::NonPositiveWorkingTime => "INVALID_RANGE",
            SubmissionError::SpanTooLong { .. } | SubmissionError::RequestPeriodTooLong { .. } => {
                "RANGE_TOO_LONG"
            }
            SubmissionError::InvalidBreakFormat => "INVALID_BREAK_FORMAT",
            SubmissionError::BreakExceedsWorkingTime => "BREAK_EXCEEDS_WORKING_TIME",
            SubmissionError::BreakBelowStatutoryMinimum { .. } | SubmissionError::BreakNotStatutory => {
                "BREAK_BELOW_STATUTORY_MINIMUM"
            }
            SubmissionError::AttendanceSpanUnavailable => "ATTENDANCE_SPAN_UNAVAILABLE",
            SubmissionError::LeaveConflict { .. } | SubmissionError::AdjustmentConflict { .. } => {
                "DATE_CONFLICT"
            }
            SubmissionError::LeaveCheckFailed | SubmissionError::AdjustmentCheckFailed => {
                "CONFLICT_CHECK_UNAVAILABLE"
            }
            SubmissionError::HalfDayRequiresPaidLeave | SubmissionError::HalfDaySingleDateOnly => {
                "INVALID_HALF_DAY"
            }
            SubmissionError::PaidLeaveReasonRequired => "REASON_REQUIRED",
            SubmissionError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            SubmissionError::NoActiveGrant => "NO_ACTIVE_GRANT",
            SubmissionError::NoWorkDaysSelected => "NO_WORK_DAYS",
        }
    }

    /// Whether the rejection comes from an unavailable upstream rather than the input.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            SubmissionError::LeaveCheckFailed | SubmissionError::AdjustmentCheckFailed
        )
    }
}

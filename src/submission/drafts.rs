//! Form inputs before and after validation, and the payloads sent upstream.
//!
//! Drafts carry exactly what the forms hold, every field optional and
//! textual. Validation turns a draft into its `Validated*` counterpart, whose
//! payload builder emits normalized values: integer minutes, `YYYY-MM-DD`
//! dates and `HH:MM` times.

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DateRange, LeaveTimeUnit, LeaveType, TimeSpan};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Upper-case weekday name as used by the backend (`MONDAY`…`SUNDAY`).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Case-insensitive parse of a full weekday name.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_ascii_uppercase().as_str() {
        "MONDAY" => Some(Weekday::Mon),
        "TUESDAY" => Some(Weekday::Tue),
        "WEDNESDAY" => Some(Weekday::Wed),
        "THURSDAY" => Some(Weekday::Thu),
        "FRIDAY" => Some(Weekday::Fri),
        "SATURDAY" => Some(Weekday::Sat),
        "SUNDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

// =============================================================================
// Time adjustment (打刻修正)
// =============================================================================

/// The time adjustment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentDraft {
    /// Clock-in date, `YYYY-MM-DD`.
    pub clock_in_date: Option<String>,
    /// Clock-in time, `HH:MM`.
    pub clock_in_time: Option<String>,
    /// Clock-out date, `YYYY-MM-DD`.
    pub clock_out_date: Option<String>,
    /// Clock-out time, `HH:MM`.
    pub clock_out_time: Option<String>,
    /// Break taken, `H:MM`. Absent means the statutory minimum.
    pub break_time: Option<String>,
    /// Why the record needs correcting.
    pub reason: Option<String>,
}

/// A time adjustment that passed every local rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedAdjustment {
    /// Corrected clock-in to clock-out span.
    pub span: TimeSpan,
    /// Break to record, in minutes.
    pub break_minutes: i64,
    /// Net working minutes after the break.
    pub working_minutes: i64,
    /// Whether the break was entered rather than assumed.
    pub break_entered: bool,
    /// Reason, trimmed.
    pub reason: String,
}

impl ValidatedAdjustment {
    /// Dates the adjustment touches, from clock-in date to clock-out date.
    pub fn target_dates(&self) -> DateRange {
        self.span.date_range()
    }

    /// Builds the request body for the adjustment endpoint.
    pub fn to_payload(&self, employee_id: &str) -> AdjustmentPayload {
        let clock_in_date = self.span.start().format(DATE_FORMAT).to_string();
        AdjustmentPayload {
            employee_id: employee_id.to_string(),
            date: clock_in_date.clone(),
            clock_in_date,
            clock_in_time: self.span.start().format(TIME_FORMAT).to_string(),
            clock_out_date: self.span.end().format(DATE_FORMAT).to_string(),
            clock_out_time: self.span.end().format(TIME_FORMAT).to_string(),
            break_minutes: self.break_entered.then_some(self.break_minutes),
            reason: self.reason.clone(),
        }
    }
}

/// Request body for `POST /api/attendance/adjustment-request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentPayload {
    /// Submitting employee.
    pub employee_id: String,
    /// Attendance date (the clock-in date).
    pub date: String,
    /// Clock-in date.
    pub clock_in_date: String,
    /// Clock-in time.
    pub clock_in_time: String,
    /// Clock-out date.
    pub clock_out_date: String,
    /// Clock-out time.
    pub clock_out_time: String,
    /// Entered break, omitted when the statutory minimum applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<i64>,
    /// Reason.
    pub reason: String,
}

// =============================================================================
// Leave (休暇申請)
// =============================================================================

/// The leave request form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Portion of the day.
    #[serde(default)]
    pub time_unit: LeaveTimeUnit,
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`. Absent means the start date.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A leave request that passed every local rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedLeave {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Portion of the day.
    pub time_unit: LeaveTimeUnit,
    /// Requested dates.
    pub range: DateRange,
    /// Days the request consumes.
    pub requested_days: Decimal,
    /// Reason, trimmed, if any.
    pub reason: Option<String>,
}

impl ValidatedLeave {
    /// Builds the request body for the leave endpoint.
    pub fn to_payload(&self, employee_id: &str) -> LeavePayload {
        LeavePayload {
            employee_id: employee_id.to_string(),
            leave_type: self.leave_type,
            time_unit: self.time_unit,
            start_date: self.range.start().format(DATE_FORMAT).to_string(),
            end_date: self.range.end().format(DATE_FORMAT).to_string(),
            reason: self.reason.clone(),
        }
    }
}

/// Request body for `POST /api/leave/requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePayload {
    /// Submitting employee.
    pub employee_id: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Portion of the day.
    pub time_unit: LeaveTimeUnit,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
    /// Reason, `null` when blank.
    pub reason: Option<String>,
}

// =============================================================================
// Work pattern change (勤務時間変更)
// =============================================================================

/// The work pattern change form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkPatternDraft {
    /// First day the pattern applies, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day the pattern applies, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Daily start time, `HH:MM`.
    pub start_time: Option<String>,
    /// Daily end time, `HH:MM`.
    pub end_time: Option<String>,
    /// Daily break, `H:MM`. Absent or malformed means the statutory minimum.
    pub break_time: Option<String>,
    /// Working weekdays by full name (`MONDAY`…).
    pub active_days: Vec<String>,
    /// Reason.
    pub reason: Option<String>,
}

/// A work pattern change that passed every local rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedWorkPattern {
    /// Days the pattern applies.
    pub period: DateRange,
    /// Daily start.
    pub start_time: NaiveTime,
    /// Daily end.
    pub end_time: NaiveTime,
    /// Daily break, within the daily span.
    pub break_minutes: i64,
    /// Daily net working minutes.
    pub working_minutes: i64,
    /// Working weekdays, Monday first, without duplicates.
    pub active_days: Vec<Weekday>,
    /// Reason, trimmed, if any.
    pub reason: Option<String>,
}

impl ValidatedWorkPattern {
    /// Builds the request body for the work pattern endpoint.
    pub fn to_payload(&self, employee_id: &str) -> WorkPatternPayload {
        WorkPatternPayload {
            employee_id: employee_id.to_string(),
            start_date: self.period.start().format(DATE_FORMAT).to_string(),
            end_date: self.period.end().format(DATE_FORMAT).to_string(),
            start_time: self.start_time.format(TIME_FORMAT).to_string(),
            end_time: self.end_time.format(TIME_FORMAT).to_string(),
            break_minutes: self.break_minutes,
            reason: self.reason.clone(),
            active_days: self
                .active_days
                .iter()
                .map(|day| weekday_name(*day).to_string())
                .collect(),
        }
    }
}

/// Request body for `POST /api/work-pattern-change/requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatternPayload {
    /// Submitting employee.
    pub employee_id: String,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
    /// Daily start.
    pub start_time: String,
    /// Daily end.
    pub end_time: String,
    /// Daily break.
    pub break_minutes: i64,
    /// Reason, `null` when blank.
    pub reason: Option<String>,
    /// Working weekdays.
    pub active_days: Vec<String>,
}

// =============================================================================
// Break correction (休憩時間修正)
// =============================================================================

/// A break correction on an existing attendance record that passed every
/// local rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedBreakEdit {
    /// Break to record.
    pub break_minutes: u32,
    /// Net working minutes after the break.
    pub working_minutes: i64,
}

/// Parses a `YYYY-MM-DD` form date.
pub(crate) fn parse_form_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Parses an `HH:MM` (or `HH:MM:SS`) form time.
pub(crate) fn parse_form_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

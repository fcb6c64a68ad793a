//! Local validation of submission forms.
//!
//! Each function checks one form in the order its rules are presented to the
//! user and stops at the first violation, returning the [`SubmissionError`]
//! for that rule. Nothing here performs I/O.

use chrono::{NaiveDateTime, TimeDelta, Weekday};
use tracing::debug;

use crate::calculation::{
    calculate_working_minutes, parse_clock_duration, parse_instant, required_break_minutes,
    requested_days, rounded_remaining_days, uncovered_dates,
};
use crate::config::{BreakRules, LaborRules};
use crate::error::SubmissionError;
use crate::models::{DateRange, LeaveEntitlement, LeaveType, MinutesValue, TimeSpan};

use super::drafts::{
    AdjustmentDraft, LeaveDraft, ValidatedAdjustment, ValidatedBreakEdit, ValidatedLeave,
    ValidatedWorkPattern, WorkPatternDraft, parse_form_date, parse_form_time, parse_weekday,
};

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_form_date(date)?;
    let time = parse_form_time(time)?;
    Some(date.and_time(time))
}

/// Rejects an entered break that is longer than the span or shorter than the
/// statutory minimum for it.
fn check_entered_break(
    break_minutes: u32,
    total_minutes: i64,
    rules: &BreakRules,
) -> Result<(), SubmissionError> {
    if i64::from(break_minutes) > total_minutes {
        return Err(SubmissionError::BreakExceedsWorkingTime);
    }
    if let Some(tier) = rules.tier_for(total_minutes) {
        if break_minutes < tier.break_minutes {
            return Err(SubmissionError::BreakBelowStatutoryMinimum {
                threshold_hours: tier.threshold_hours(),
                required_minutes: tier.break_minutes,
            });
        }
    }
    Ok(())
}

/// Validates a time adjustment form.
///
/// Rules, in order:
///
/// 1. Clock-in date, clock-out date and reason are required.
/// 2. The clock-in date must be a valid date.
/// 3. Both clock times are required.
/// 4. Date and time must combine into valid timestamps.
/// 5. Clock-out must be after clock-in.
/// 6. The span may not exceed the configured maximum (36 hours by default;
///    exactly the maximum is allowed).
/// 7. An entered break must be `H:MM`, no longer than the span and no
///    shorter than the statutory minimum.
///
/// # Example
///
/// ```
/// use kintai_core::config::LaborRules;
/// use kintai_core::error::SubmissionError;
/// use kintai_core::submission::{validate_adjustment, AdjustmentDraft};
///
/// let draft = AdjustmentDraft {
///     clock_in_date: Some("2024-03-05".to_string()),
///     clock_in_time: Some("09:00".to_string()),
///     clock_out_date: Some("2024-03-05".to_string()),
///     clock_out_time: Some("20:00".to_string()),
///     break_time: Some("0:30".to_string()),
///     reason: Some("打刻漏れ".to_string()),
/// };
///
/// let error = validate_adjustment(&draft, &LaborRules::default()).unwrap_err();
/// assert_eq!(error.to_string(), "実働8時間以上の場合、休憩時間は60分以上必要です");
/// ```
pub fn validate_adjustment(
    draft: &AdjustmentDraft,
    rules: &LaborRules,
) -> Result<ValidatedAdjustment, SubmissionError> {
    let (Some(clock_in_date), Some(clock_out_date), Some(reason)) = (
        non_blank(&draft.clock_in_date),
        non_blank(&draft.clock_out_date),
        non_blank(&draft.reason),
    ) else {
        return Err(SubmissionError::MissingAdjustmentFields);
    };

    if parse_form_date(clock_in_date).is_none() {
        return Err(SubmissionError::InvalidClockInDate);
    }

    let (Some(clock_in_time), Some(clock_out_time)) = (
        non_blank(&draft.clock_in_time),
        non_blank(&draft.clock_out_time),
    ) else {
        return Err(SubmissionError::MissingClockTimes);
    };

    let (Some(start), Some(end)) = (
        combine(clock_in_date, clock_in_time),
        combine(clock_out_date, clock_out_time),
    ) else {
        return Err(SubmissionError::InvalidDateTime);
    };

    let span = TimeSpan::new(start, end).map_err(|_| SubmissionError::ClockOutNotAfterClockIn)?;

    if end - start > TimeDelta::minutes(rules.limits.max_span_minutes()) {
        return Err(SubmissionError::SpanTooLong {
            max_hours: rules.limits.max_span_hours,
        });
    }

    let total_minutes = span.total_minutes();
    let entered_break = match non_blank(&draft.break_time) {
        Some(text) => {
            let minutes =
                parse_clock_duration(text).map_err(|_| SubmissionError::InvalidBreakFormat)?;
            check_entered_break(minutes, total_minutes, &rules.breaks)?;
            Some(minutes)
        }
        None => None,
    };

    let break_value = entered_break.map(|minutes| MinutesValue::from(i64::from(minutes)));
    let breakdown = calculate_working_minutes(&span, break_value.as_ref(), &rules.breaks);

    Ok(ValidatedAdjustment {
        span,
        break_minutes: breakdown.break_minutes,
        working_minutes: breakdown.working_minutes,
        break_entered: entered_break.is_some(),
        reason: reason.to_string(),
    })
}

/// Validates a leave request form.
///
/// Rules, in order:
///
/// 1. The start date is required; a missing end date means the start date.
/// 2. Both dates must be valid.
/// 3. The end date may not be before the start date.
/// 4. The period may not exceed the configured maximum number of days.
/// 5. Half days are only available for paid leave.
/// 6. Half days cover a single date.
/// 7. Paid leave needs a reason.
/// 8. When the entitlement is known, the requested days (0.5 for a half
///    day) may not exceed the remaining balance, and summer, winter and
///    special leave must fall entirely within an active grant.
pub fn validate_leave(
    draft: &LeaveDraft,
    entitlement: Option<&LeaveEntitlement>,
    rules: &LaborRules,
) -> Result<ValidatedLeave, SubmissionError> {
    let start_text = non_blank(&draft.start_date).ok_or(SubmissionError::MissingLeaveDates)?;
    let end_text = non_blank(&draft.end_date).unwrap_or(start_text);

    let (Some(start), Some(end)) = (parse_form_date(start_text), parse_form_date(end_text)) else {
        return Err(SubmissionError::InvalidDate);
    };
    let range = DateRange::new(start, end).map_err(|_| SubmissionError::EndDateBeforeStart)?;

    if range.days() > i64::from(rules.limits.max_request_days) {
        return Err(SubmissionError::RequestPeriodTooLong {
            max_days: rules.limits.max_request_days,
        });
    }

    if draft.time_unit.is_half_day() {
        if draft.leave_type != LeaveType::PaidLeave {
            return Err(SubmissionError::HalfDayRequiresPaidLeave);
        }
        if range.days() != 1 {
            return Err(SubmissionError::HalfDaySingleDateOnly);
        }
    }

    let reason = non_blank(&draft.reason).map(str::to_string);
    if draft.leave_type == LeaveType::PaidLeave && reason.is_none() {
        return Err(SubmissionError::PaidLeaveReasonRequired);
    }

    let requested = requested_days(&range, draft.time_unit);

    match entitlement {
        Some(entitlement) => {
            let remaining = rounded_remaining_days(entitlement.remaining_days);
            if remaining < requested {
                return Err(SubmissionError::InsufficientBalance {
                    requested: requested.normalize().to_string(),
                    label: draft.leave_type.label().to_string(),
                    remaining: remaining.to_string(),
                });
            }
            if draft.leave_type.requires_grant()
                && !uncovered_dates(&range, &entitlement.grants).is_empty()
            {
                return Err(SubmissionError::NoActiveGrant);
            }
        }
        None => debug!(
            leave_type = ?draft.leave_type,
            "No entitlement supplied, skipping balance and grant checks"
        ),
    }

    Ok(ValidatedLeave {
        leave_type: draft.leave_type,
        time_unit: draft.time_unit,
        range,
        requested_days: requested,
        reason,
    })
}

/// Validates a work pattern change form.
///
/// Rules, in order:
///
/// 1. Start date, end date, start time and end time are required.
/// 2. Both dates must be valid, and the end date may not be before the start.
/// 3. At least one working weekday must be selected.
/// 4. Both times must be valid.
/// 5. The end time must be after the start time.
///
/// A missing or malformed break defaults to the statutory minimum for the
/// daily span; any break is clamped to the span.
pub fn validate_work_pattern(
    draft: &WorkPatternDraft,
    rules: &LaborRules,
) -> Result<ValidatedWorkPattern, SubmissionError> {
    let (Some(start_date), Some(end_date), Some(start_time), Some(end_time)) = (
        non_blank(&draft.start_date),
        non_blank(&draft.end_date),
        non_blank(&draft.start_time),
        non_blank(&draft.end_time),
    ) else {
        return Err(SubmissionError::MissingPatternFields);
    };

    let (Some(start_date), Some(end_date)) = (parse_form_date(start_date), parse_form_date(end_date))
    else {
        return Err(SubmissionError::InvalidDate);
    };
    let period =
        DateRange::new(start_date, end_date).map_err(|_| SubmissionError::PatternEndBeforeStart)?;

    let mut active_days: Vec<Weekday> = draft
        .active_days
        .iter()
        .filter_map(|name| {
            let day = parse_weekday(name);
            if day.is_none() {
                debug!(day = %name, "Ignoring unknown weekday");
            }
            day
        })
        .collect();
    active_days.sort_by_key(Weekday::num_days_from_monday);
    active_days.dedup();
    if active_days.is_empty() {
        return Err(SubmissionError::NoWorkDaysSelected);
    }

    let (Some(start), Some(end)) = (parse_form_time(start_time), parse_form_time(end_time)) else {
        return Err(SubmissionError::InvalidWorkingHours);
    };
    if end <= start {
        return Err(SubmissionError::NonPositiveWorkingTime);
    }

    let total_minutes = (end - start).num_minutes();
    let entered = non_blank(&draft.break_time).and_then(|text| parse_clock_duration(text).ok());
    let break_minutes = entered
        .map(i64::from)
        .unwrap_or_else(|| i64::from(required_break_minutes(total_minutes, &rules.breaks)))
        .clamp(0, total_minutes);

    Ok(ValidatedWorkPattern {
        period,
        start_time: start,
        end_time: end,
        break_minutes,
        working_minutes: (total_minutes - break_minutes).max(0),
        active_days,
        reason: non_blank(&draft.reason).map(str::to_string),
    })
}

/// Validates a break correction on an existing attendance record.
///
/// The break must be `H:MM`. The record's clock-in and clock-out must form a
/// valid span, and the break must be no longer than that span and no shorter
/// than its statutory minimum.
///
/// # Example
///
/// ```
/// use kintai_core::config::LaborRules;
/// use kintai_core::submission::validate_break_edit;
///
/// let edit = validate_break_edit(
///     Some("2024-03-05T09:00:00"),
///     Some("2024-03-05T18:00:00"),
///     "1:00",
///     &LaborRules::default(),
/// )
/// .unwrap();
/// assert_eq!(edit.break_minutes, 60);
/// assert_eq!(edit.working_minutes, 480);
/// ```
pub fn validate_break_edit(
    clock_in: Option<&str>,
    clock_out: Option<&str>,
    raw_break: &str,
    rules: &LaborRules,
) -> Result<ValidatedBreakEdit, SubmissionError> {
    let break_minutes =
        parse_clock_duration(raw_break).map_err(|_| SubmissionError::InvalidBreakFormat)?;

    let span = clock_in
        .zip(clock_out)
        .and_then(|(start, end)| {
            let start = parse_instant(start).ok()?;
            let end = parse_instant(end).ok()?;
            TimeSpan::new(start, end).ok()
        })
        .ok_or(SubmissionError::AttendanceSpanUnavailable)?;

    let total_minutes = span.total_minutes();
    check_entered_break(break_minutes, total_minutes, &rules.breaks).map_err(|error| match error {
        SubmissionError::BreakBelowStatutoryMinimum { .. } => SubmissionError::BreakNotStatutory,
        other => other,
    })?;

    Ok(ValidatedBreakEdit {
        break_minutes,
        working_minutes: total_minutes - i64::from(break_minutes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveGrant, LeaveTimeUnit};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn rules() -> LaborRules {
        LaborRules::default()
    }

    fn adjustment(
        clock_in: (&str, &str),
        clock_out: (&str, &str),
        break_time: Option<&str>,
    ) -> AdjustmentDraft {
        AdjustmentDraft {
            clock_in_date: Some(clock_in.0.to_string()),
            clock_in_time: Some(clock_in.1.to_string()),
            clock_out_date: Some(clock_out.0.to_string()),
            clock_out_time: Some(clock_out.1.to_string()),
            break_time: break_time.map(str::to_string),
            reason: Some("打刻漏れ".to_string()),
        }
    }

    fn leave(
        leave_type: LeaveType,
        time_unit: LeaveTimeUnit,
        start: &str,
        end: Option<&str>,
    ) -> LeaveDraft {
        LeaveDraft {
            leave_type,
            time_unit,
            start_date: Some(start.to_string()),
            end_date: end.map(str::to_string),
            reason: Some("私用".to_string()),
        }
    }

    fn entitlement(remaining: Decimal) -> LeaveEntitlement {
        LeaveEntitlement {
            remaining_days: remaining,
            grants: vec![],
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // -------------------------------------------------------------------------
    // Adjustment
    // -------------------------------------------------------------------------

    /// 09:00 to 20:00 is 660 minutes; 30 minutes is below the 60 minute tier.
    #[test]
    fn test_adjustment_break_below_statutory_minimum() {
        let draft = adjustment(
            ("2024-03-05", "09:00"),
            ("2024-03-05", "20:00"),
            Some("0:30"),
        );
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::BreakBelowStatutoryMinimum {
                threshold_hours: 8,
                required_minutes: 60,
            })
        );
    }

    #[test]
    fn test_adjustment_missing_reason() {
        let mut draft = adjustment(("2024-03-05", "09:00"), ("2024-03-05", "18:00"), None);
        draft.reason = Some("  ".to_string());
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::MissingAdjustmentFields)
        );
    }

    #[test]
    fn test_adjustment_invalid_clock_in_date() {
        let draft = adjustment(("2024-02-30", "09:00"), ("2024-03-01", "18:00"), None);
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::InvalidClockInDate)
        );
    }

    #[test]
    fn test_adjustment_missing_clock_time() {
        let mut draft = adjustment(("2024-03-05", "09:00"), ("2024-03-05", "18:00"), None);
        draft.clock_out_time = None;
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::MissingClockTimes)
        );
    }

    #[test]
    fn test_adjustment_invalid_clock_out_date() {
        let draft = adjustment(("2024-03-05", "09:00"), ("2024-03-32", "18:00"), None);
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::InvalidDateTime)
        );
    }

    #[test]
    fn test_adjustment_clock_out_not_after_clock_in() {
        let draft = adjustment(("2024-03-05", "09:00"), ("2024-03-05", "09:00"), None);
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::ClockOutNotAfterClockIn)
        );
    }

    #[test]
    fn test_adjustment_exactly_36_hours_allowed() {
        let draft = adjustment(("2024-03-05", "09:00"), ("2024-03-06", "21:00"), None);
        let validated = validate_adjustment(&draft, &rules()).unwrap();
        assert_eq!(validated.span.total_minutes(), 2160);
        assert_eq!(validated.break_minutes, 60);
        assert!(!validated.break_entered);
    }

    #[test]
    fn test_adjustment_over_36_hours_rejected() {
        let draft = adjustment(("2024-03-05", "09:00"), ("2024-03-06", "21:01"), None);
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::SpanTooLong { max_hours: 36 })
        );
    }

    #[test]
    fn test_adjustment_malformed_break() {
        let draft = adjustment(
            ("2024-03-05", "09:00"),
            ("2024-03-05", "18:00"),
            Some("30分"),
        );
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::InvalidBreakFormat)
        );
    }

    #[test]
    fn test_adjustment_break_exceeds_span() {
        let draft = adjustment(
            ("2024-03-05", "09:00"),
            ("2024-03-05", "10:00"),
            Some("1:30"),
        );
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::BreakExceedsWorkingTime)
        );
    }

    #[test]
    fn test_adjustment_six_hour_tier() {
        let draft = adjustment(
            ("2024-03-05", "09:00"),
            ("2024-03-05", "15:00"),
            Some("0:44"),
        );
        assert_eq!(
            validate_adjustment(&draft, &rules()),
            Err(SubmissionError::BreakBelowStatutoryMinimum {
                threshold_hours: 6,
                required_minutes: 45,
            })
        );
    }

    #[test]
    fn test_adjustment_valid_with_entered_break() {
        let draft = adjustment(
            ("2024-03-05", "09:00"),
            ("2024-03-05", "18:30"),
            Some("1:00"),
        );
        let validated = validate_adjustment(&draft, &rules()).unwrap();
        assert!(validated.break_entered);
        assert_eq!(validated.break_minutes, 60);
        assert_eq!(validated.working_minutes, 510);
        assert_eq!(validated.reason, "打刻漏れ");
    }

    // -------------------------------------------------------------------------
    // Leave
    // -------------------------------------------------------------------------

    #[test]
    fn test_leave_missing_start() {
        let mut draft = leave(LeaveType::PaidLeave, LeaveTimeUnit::FullDay, "", None);
        draft.start_date = None;
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::MissingLeaveDates)
        );
    }

    #[test]
    fn test_leave_end_before_start() {
        let draft = leave(
            LeaveType::PaidLeave,
            LeaveTimeUnit::FullDay,
            "2024-05-03",
            Some("2024-05-01"),
        );
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::EndDateBeforeStart)
        );
        assert_eq!(
            SubmissionError::EndDateBeforeStart.to_string(),
            "終了日は開始日以降の日付を選択してください"
        );
    }

    #[test]
    fn test_leave_invalid_date() {
        let draft = leave(
            LeaveType::PaidLeave,
            LeaveTimeUnit::FullDay,
            "2024-05-01",
            Some("05/03"),
        );
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::InvalidDate)
        );
    }

    #[test]
    fn test_leave_period_too_long() {
        let draft = leave(
            LeaveType::PaidLeave,
            LeaveTimeUnit::FullDay,
            "2024-01-01",
            Some("2025-01-01"),
        );
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::RequestPeriodTooLong { max_days: 366 })
        );
    }

    #[test]
    fn test_half_day_only_for_paid_leave() {
        let draft = leave(LeaveType::Summer, LeaveTimeUnit::HalfAm, "2024-08-13", None);
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::HalfDayRequiresPaidLeave)
        );
    }

    #[test]
    fn test_half_day_single_date_only() {
        let draft = leave(
            LeaveType::PaidLeave,
            LeaveTimeUnit::HalfPm,
            "2024-08-13",
            Some("2024-08-14"),
        );
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::HalfDaySingleDateOnly)
        );
    }

    #[test]
    fn test_paid_leave_requires_reason() {
        let mut draft = leave(LeaveType::PaidLeave, LeaveTimeUnit::FullDay, "2024-05-01", None);
        draft.reason = None;
        assert_eq!(
            validate_leave(&draft, None, &rules()),
            Err(SubmissionError::PaidLeaveReasonRequired)
        );
        assert_eq!(
            SubmissionError::PaidLeaveReasonRequired.to_string(),
            "有休の場合は理由を入力してください"
        );
    }

    #[test]
    fn test_special_leave_without_reason_is_allowed() {
        let mut draft = leave(LeaveType::Special, LeaveTimeUnit::FullDay, "2024-05-01", None);
        draft.reason = None;
        let validated = validate_leave(&draft, None, &rules()).unwrap();
        assert_eq!(validated.reason, None);
    }

    #[test]
    fn test_leave_insufficient_balance_message() {
        let draft = leave(
            LeaveType::PaidLeave,
            LeaveTimeUnit::FullDay,
            "2024-05-01",
            Some("2024-05-03"),
        );
        let error = validate_leave(&draft, Some(&entitlement(Decimal::new(25, 1))), &rules())
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "申請日数（3日）が有休の残日数（2.5日）を超えています"
        );
    }

    #[test]
    fn test_half_day_fits_half_day_balance() {
        let draft = leave(LeaveType::PaidLeave, LeaveTimeUnit::HalfAm, "2024-05-01", None);
        let validated =
            validate_leave(&draft, Some(&entitlement(Decimal::new(5, 1))), &rules()).unwrap();
        assert_eq!(validated.requested_days, Decimal::new(5, 1));
    }

    #[test]
    fn test_summer_leave_needs_grant_coverage() {
        let draft = leave(
            LeaveType::Summer,
            LeaveTimeUnit::FullDay,
            "2024-09-30",
            Some("2024-10-01"),
        );
        let ent = LeaveEntitlement {
            remaining_days: Decimal::from(5),
            grants: vec![LeaveGrant {
                granted_at: Some(date("2024-07-01")),
                expires_at: Some(date("2024-09-30")),
            }],
        };
        assert_eq!(
            validate_leave(&draft, Some(&ent), &rules()),
            Err(SubmissionError::NoActiveGrant)
        );
    }

    #[test]
    fn test_missing_end_defaults_to_start() {
        let draft = leave(LeaveType::PaidLeave, LeaveTimeUnit::FullDay, "2024-05-01", None);
        let validated = validate_leave(&draft, None, &rules()).unwrap();
        assert_eq!(validated.range, DateRange::single(date("2024-05-01")));
        assert_eq!(validated.requested_days, Decimal::from(1));
    }

    // -------------------------------------------------------------------------
    // Work pattern
    // -------------------------------------------------------------------------

    fn pattern() -> WorkPatternDraft {
        WorkPatternDraft {
            start_date: Some("2024-04-01".to_string()),
            end_date: Some("2024-06-30".to_string()),
            start_time: Some("08:30".to_string()),
            end_time: Some("17:30".to_string()),
            break_time: None,
            active_days: vec!["FRIDAY".to_string(), "MONDAY".to_string(), "MONDAY".to_string()],
            reason: None,
        }
    }

    #[test]
    fn test_work_pattern_defaults_statutory_break() {
        let validated = validate_work_pattern(&pattern(), &rules()).unwrap();
        assert_eq!(validated.break_minutes, 60);
        assert_eq!(validated.working_minutes, 480);
        assert_eq!(validated.active_days, vec![Weekday::Mon, Weekday::Fri]);
    }

    #[test]
    fn test_work_pattern_missing_field() {
        let mut draft = pattern();
        draft.end_time = None;
        assert_eq!(
            validate_work_pattern(&draft, &rules()),
            Err(SubmissionError::MissingPatternFields)
        );
    }

    #[test]
    fn test_work_pattern_end_before_start() {
        let mut draft = pattern();
        draft.end_date = Some("2024-03-31".to_string());
        assert_eq!(
            validate_work_pattern(&draft, &rules()),
            Err(SubmissionError::PatternEndBeforeStart)
        );
    }

    #[test]
    fn test_work_pattern_requires_a_day() {
        let mut draft = pattern();
        draft.active_days = vec!["HOLIDAY".to_string()];
        assert_eq!(
            validate_work_pattern(&draft, &rules()),
            Err(SubmissionError::NoWorkDaysSelected)
        );
    }

    #[test]
    fn test_work_pattern_invalid_time() {
        let mut draft = pattern();
        draft.start_time = Some("8時".to_string());
        assert_eq!(
            validate_work_pattern(&draft, &rules()),
            Err(SubmissionError::InvalidWorkingHours)
        );
    }

    #[test]
    fn test_work_pattern_non_positive_span() {
        let mut draft = pattern();
        draft.end_time = Some("08:30".to_string());
        assert_eq!(
            validate_work_pattern(&draft, &rules()),
            Err(SubmissionError::NonPositiveWorkingTime)
        );
    }

    #[test]
    fn test_work_pattern_break_clamped_to_span() {
        let mut draft = pattern();
        draft.end_time = Some("09:00".to_string());
        draft.break_time = Some("1:00".to_string());
        let validated = validate_work_pattern(&draft, &rules()).unwrap();
        assert_eq!(validated.break_minutes, 30);
        assert_eq!(validated.working_minutes, 0);
    }

    #[test]
    fn test_work_pattern_malformed_break_uses_statutory() {
        let mut draft = pattern();
        draft.break_time = Some("lunch".to_string());
        let validated = validate_work_pattern(&draft, &rules()).unwrap();
        assert_eq!(validated.break_minutes, 60);
    }

    // -------------------------------------------------------------------------
    // Break edit
    // -------------------------------------------------------------------------

    #[test]
    fn test_break_edit_rejects_format() {
        assert_eq!(
            validate_break_edit(
                Some("2024-03-05T09:00:00"),
                Some("2024-03-05T18:00:00"),
                "60",
                &rules()
            ),
            Err(SubmissionError::InvalidBreakFormat)
        );
    }

    #[test]
    fn test_break_edit_without_clock_out() {
        assert_eq!(
            validate_break_edit(Some("2024-03-05T09:00:00"), None, "1:00", &rules()),
            Err(SubmissionError::AttendanceSpanUnavailable)
        );
    }

    #[test]
    fn test_break_edit_below_minimum() {
        assert_eq!(
            validate_break_edit(
                Some("2024-03-05T09:00:00"),
                Some("2024-03-05T16:00:00"),
                "0:30",
                &rules()
            ),
            Err(SubmissionError::BreakNotStatutory)
        );
        assert_eq!(
            SubmissionError::BreakNotStatutory.to_string(),
            "休憩時間が法定通りではありません"
        );
    }

    #[test]
    fn test_break_edit_short_day_allows_zero() {
        let edit = validate_break_edit(
            Some("2024-03-05T09:00:00"),
            Some("2024-03-05T13:00:00"),
            "0:00",
            &rules(),
        )
        .unwrap();
        assert_eq!(edit.working_minutes, 240);
    }
}

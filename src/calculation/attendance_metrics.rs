//! Late, early-leave, overtime and late-night minutes for an attendance record.
//!
//! All inputs are truncated to whole minutes before comparison. Late and
//! early-leave minutes are measured against the standard schedule, then
//! reconciled with net working time: a record reaching the standard day has
//! neither, and a short record has its shortfall fully accounted for between
//! the two.

use chrono::{DurationRound, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BreakRules, StandardSchedule};
use crate::models::{MinutesValue, TimeSpan};

use super::working_time::calculate_working_minutes;

/// Derived minute counts for one attendance record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMetrics {
    /// Break deducted.
    pub break_minutes: i64,
    /// Net working minutes.
    pub working_minutes: i64,
    /// Minutes late after reconciliation.
    pub late_minutes: i64,
    /// Minutes of early leave after reconciliation.
    pub early_leave_minutes: i64,
    /// Net working minutes beyond the standard day.
    pub overtime_minutes: i64,
    /// Minutes inside late-night windows.
    pub night_shift_minutes: i64,
}

fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .duration_trunc(TimeDelta::minutes(1))
        .unwrap_or(instant)
}

fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    (to - from).num_minutes()
}

/// Minutes by which clock-in is later than the scheduled start.
///
/// Only the time of day is compared.
pub fn calculate_late_minutes(clock_in: NaiveDateTime, schedule: &StandardSchedule) -> i64 {
    let time = truncate_to_minute(clock_in).time();
    if time > schedule.start_time {
        minutes_between(schedule.start_time, time)
    } else {
        0
    }
}

/// Minutes by which clock-out is earlier than the scheduled end.
///
/// Only the time of day is compared.
pub fn calculate_early_leave_minutes(
    clock_out: NaiveDateTime,
    schedule: &StandardSchedule,
) -> i64 {
    let time = truncate_to_minute(clock_out).time();
    if time < schedule.end_time {
        minutes_between(time, schedule.end_time)
    } else {
        0
    }
}

/// Net working minutes beyond the standard day.
pub fn calculate_overtime_minutes(working_minutes: i64, schedule: &StandardSchedule) -> i64 {
    (working_minutes - i64::from(schedule.standard_working_minutes)).max(0)
}

/// Minutes of the span inside late-night windows.
///
/// A window opens at `night_start` on each calendar day and closes at
/// `night_end`, on the following day when `night_end` is not after
/// `night_start`. The window opened the evening before clock-in is included.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::{calculate_night_shift_minutes, parse_instant};
/// use kintai_core::config::StandardSchedule;
/// use kintai_core::models::TimeSpan;
///
/// let span = TimeSpan::new(
///     parse_instant("2024-03-05T20:00").unwrap(),
///     parse_instant("2024-03-06T06:00").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(calculate_night_shift_minutes(&span, &StandardSchedule::default()), 420);
/// ```
pub fn calculate_night_shift_minutes(span: &TimeSpan, schedule: &StandardSchedule) -> i64 {
    let start = truncate_to_minute(span.start());
    let end = truncate_to_minute(span.end());
    if end <= start {
        return 0;
    }

    let wraps = schedule.night_end <= schedule.night_start;
    let first_day = start.date().pred_opt().unwrap_or(start.date());

    first_day
        .iter_days()
        .take_while(|day| *day <= end.date())
        .map(|day| {
            let window_start = day.and_time(schedule.night_start);
            let window_end = if wraps {
                day.and_time(schedule.night_end) + TimeDelta::days(1)
            } else {
                day.and_time(schedule.night_end)
            };
            let overlap_start = start.max(window_start);
            let overlap_end = end.min(window_end);
            if overlap_end > overlap_start {
                (overlap_end - overlap_start).num_minutes()
            } else {
                0
            }
        })
        .sum()
}

/// Calculates every derived metric for a clocked span.
///
/// A missing or unusable `break_minutes` falls back to the statutory
/// minimum. A span that truncation to minutes collapses (shorter than a
/// minute within one clock minute) yields all-zero metrics.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::{calculate_attendance_metrics, parse_instant};
/// use kintai_core::config::LaborRules;
/// use kintai_core::models::TimeSpan;
///
/// // 09:30 to 17:00 with the statutory 45 minute break: 405 minutes worked,
/// // 75 minutes short of the standard day.
/// let span = TimeSpan::new(
///     parse_instant("2024-03-05T09:30").unwrap(),
///     parse_instant("2024-03-05T17:00").unwrap(),
/// )
/// .unwrap();
/// let rules = LaborRules::default();
/// let metrics = calculate_attendance_metrics(&span, None, &rules.breaks, &rules.schedule);
///
/// assert_eq!(metrics.working_minutes, 405);
/// assert_eq!(metrics.late_minutes, 30);
/// assert_eq!(metrics.early_leave_minutes, 60);
/// ```
pub fn calculate_attendance_metrics(
    span: &TimeSpan,
    break_minutes: Option<&MinutesValue>,
    breaks: &BreakRules,
    schedule: &StandardSchedule,
) -> AttendanceMetrics {
    let Ok(truncated) = span.truncated_to_minutes() else {
        debug!(start = %span.start(), end = %span.end(), "Span collapses to zero minutes");
        return AttendanceMetrics::default();
    };
    let breakdown = calculate_working_minutes(&truncated, break_minutes, breaks);
    let working_minutes = breakdown.working_minutes;

    let raw_late = calculate_late_minutes(truncated.start(), schedule);
    let raw_early = calculate_early_leave_minutes(truncated.end(), schedule);
    let standard = i64::from(schedule.standard_working_minutes);

    let (late_minutes, early_leave_minutes) = if working_minutes >= standard {
        (0, 0)
    } else {
        let shortfall = standard - working_minutes;
        let late = raw_late.min(shortfall);
        let covered = late + raw_early;
        let early = if covered < shortfall {
            raw_early + (shortfall - covered)
        } else {
            raw_early
        };
        (late, early)
    };

    AttendanceMetrics {
        break_minutes: breakdown.break_minutes,
        working_minutes,
        late_minutes,
        early_leave_minutes,
        overtime_minutes: calculate_overtime_minutes(working_minutes, schedule),
        night_shift_minutes: calculate_night_shift_minutes(&truncated, schedule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaborRules;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_span(start: (&str, &str), end: (&str, &str)) -> TimeSpan {
        TimeSpan::new(make_datetime(start.0, start.1), make_datetime(end.0, end.1)).unwrap()
    }

    fn metrics(span: &TimeSpan, break_minutes: Option<&MinutesValue>) -> AttendanceMetrics {
        let rules = LaborRules::default();
        calculate_attendance_metrics(span, break_minutes, &rules.breaks, &rules.schedule)
    }

    #[test]
    fn test_late_ignores_seconds() {
        let schedule = StandardSchedule::default();
        assert_eq!(
            calculate_late_minutes(make_datetime("2024-03-05", "09:00:59"), &schedule),
            0
        );
        assert_eq!(
            calculate_late_minutes(make_datetime("2024-03-05", "09:15:00"), &schedule),
            15
        );
    }

    #[test]
    fn test_early_leave() {
        let schedule = StandardSchedule::default();
        assert_eq!(
            calculate_early_leave_minutes(make_datetime("2024-03-05", "17:30:00"), &schedule),
            30
        );
        assert_eq!(
            calculate_early_leave_minutes(make_datetime("2024-03-05", "18:00:00"), &schedule),
            0
        );
    }

    #[test]
    fn test_standard_day_has_no_late_or_early() {
        let span = make_span(("2024-03-05", "09:00:00"), ("2024-03-05", "18:00:00"));
        let result = metrics(&span, None);
        assert_eq!(result.break_minutes, 60);
        assert_eq!(result.working_minutes, 480);
        assert_eq!(result.late_minutes, 0);
        assert_eq!(result.early_leave_minutes, 0);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.night_shift_minutes, 0);
    }

    #[test]
    fn test_late_start_made_up_by_staying_late_is_cleared() {
        let span = make_span(("2024-03-05", "10:00:00"), ("2024-03-05", "19:30:00"));
        let result = metrics(&span, None);
        assert_eq!(result.working_minutes, 510);
        assert_eq!(result.late_minutes, 0);
        assert_eq!(result.overtime_minutes, 30);
    }

    #[test]
    fn test_shortfall_from_long_break_goes_to_early_leave() {
        // On schedule, but a 2 hour break leaves 60 minutes short.
        let span = make_span(("2024-03-05", "09:00:00"), ("2024-03-05", "18:00:00"));
        let long_break = MinutesValue::from(120_i64);
        let result = metrics(&span, Some(&long_break));
        assert_eq!(result.working_minutes, 420);
        assert_eq!(result.late_minutes, 0);
        assert_eq!(result.early_leave_minutes, 60);
    }

    #[test]
    fn test_late_capped_at_shortfall() {
        // Three hours late, 470 minutes worked with no break.
        let span = make_span(("2024-03-05", "12:00:00"), ("2024-03-05", "19:50:00"));
        let zero = MinutesValue::from(0_i64);
        let result = metrics(&span, Some(&zero));
        assert_eq!(result.working_minutes, 470);
        assert_eq!(result.late_minutes, 10);
        assert_eq!(result.early_leave_minutes, 0);
    }

    #[test]
    fn test_overnight_night_minutes() {
        let schedule = StandardSchedule::default();
        let span = make_span(("2024-03-05", "21:00:00"), ("2024-03-06", "06:00:00"));
        assert_eq!(calculate_night_shift_minutes(&span, &schedule), 420);
    }

    #[test]
    fn test_early_morning_uses_previous_evening_window() {
        let schedule = StandardSchedule::default();
        let span = make_span(("2024-03-05", "03:00:00"), ("2024-03-05", "08:00:00"));
        assert_eq!(calculate_night_shift_minutes(&span, &schedule), 120);
    }

    #[test]
    fn test_span_across_two_windows() {
        let schedule = StandardSchedule::default();
        let span = make_span(("2024-03-05", "23:00:00"), ("2024-03-06", "23:30:00"));
        // 23:00-05:00 (360) plus 22:00-23:30 (90).
        assert_eq!(calculate_night_shift_minutes(&span, &schedule), 450);
    }

    #[test]
    fn test_collapsed_span_yields_zero_metrics() {
        let span = make_span(("2024-03-05", "09:00:10"), ("2024-03-05", "09:00:40"));
        assert_eq!(metrics(&span, None), AttendanceMetrics::default());
    }

    #[test]
    fn test_sub_minute_span_across_minute_boundary() {
        let span = make_span(("2024-03-05", "09:00:50"), ("2024-03-05", "09:01:10"));
        let result = metrics(&span, None);
        assert_eq!(result.working_minutes, 1);
        assert_eq!(result.break_minutes, 0);
    }
}

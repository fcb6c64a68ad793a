//! Calculation logic for the attendance rule engine.
//!
//! This module contains the pure rule functions: duration formatting and
//! parsing, statutory break tiers, net working time, late/early/overtime and
//! late-night metrics, date-range expansion, conflict detection between
//! requests, and leave-day arithmetic.

mod attendance_metrics;
mod break_rule;
mod conflict;
mod date_range;
mod duration;
mod leave_days;
mod working_time;

pub use attendance_metrics::{
    AttendanceMetrics, calculate_attendance_metrics, calculate_early_leave_minutes,
    calculate_late_minutes, calculate_night_shift_minutes, calculate_overtime_minutes,
};
pub use break_rule::{
    RequiredBreakDetection, STATUTORY_BREAK_RULE_ID, calculate_required_break_minutes,
    determine_required_break, required_break_minutes,
};
pub use conflict::find_conflicting_dates;
pub use date_range::{
    DEFAULT_MAX_RANGE_DAYS, expand_date_range, format_date_for_display, format_dates_for_display,
};
pub use duration::{
    format_minutes, format_minutes_to_time, normalize_minutes_value, parse_clock_duration,
    time_string_to_minutes,
};
pub use leave_days::{requested_days, rounded_remaining_days, uncovered_dates};
pub use working_time::{
    BreakSource, WorkingTimeBreakdown, calculate_elapsed_time, calculate_working_minutes,
    calculate_working_time, parse_instant,
};

pub use crate::models::{DateRange, parse_calendar_date};

//! Net working time for a clocked span.
//!
//! Working time is the clocked span in whole minutes minus the break. An
//! explicitly recorded break wins when it is a usable non-negative value;
//! otherwise the statutory minimum for the span is assumed. The break never
//! exceeds the span, and working time is never negative.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BreakRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MinutesValue, TimeSpan};

use super::break_rule::determine_required_break;
use super::duration::{format_minutes, normalize_minutes_value};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Where the deducted break came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakSource {
    /// A break value recorded on the attendance record.
    Explicit,
    /// The statutory minimum for the span.
    Statutory,
}

/// The breakdown of a working-time calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeBreakdown {
    /// Whole minutes between clock-in and clock-out.
    pub total_minutes: i64,
    /// Break minutes deducted, within `0..=total_minutes`.
    pub break_minutes: i64,
    /// Where the break came from.
    pub break_source: BreakSource,
    /// Net working minutes, never negative.
    pub working_minutes: i64,
    /// Audit steps for the break decision and the deduction.
    pub audit_steps: Vec<AuditStep>,
}

/// Parses a clock timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space instead of
/// `T`, and RFC 3339 timestamps with an offset. Offset timestamps keep their
/// wall-clock time, so naive and offset forms compare on the same clock.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::parse_instant;
///
/// let naive = parse_instant("2024-03-05T09:00").unwrap();
/// let offset = parse_instant("2024-03-05T18:00:00+09:00").unwrap();
/// assert_eq!(naive.to_string(), "2024-03-05 09:00:00");
/// assert_eq!(offset.to_string(), "2024-03-05 18:00:00");
/// assert!(parse_instant("yesterday").is_err());
/// ```
pub fn parse_instant(text: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = text.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| EngineError::InvalidDateTime {
            input: text.to_string(),
        })
}

/// Calculates net working minutes for a span.
///
/// # Arguments
///
/// * `span` - The clocked span
/// * `explicit_break` - The recorded break, if any, in any accepted shape
/// * `rules` - Break tiers used when no usable explicit break exists
///
/// # Example
///
/// ```
/// use kintai_core::calculation::{calculate_working_minutes, parse_instant, BreakSource};
/// use kintai_core::config::BreakRules;
/// use kintai_core::models::TimeSpan;
///
/// let span = TimeSpan::new(
///     parse_instant("2024-03-05T09:00").unwrap(),
///     parse_instant("2024-03-05T18:01").unwrap(),
/// )
/// .unwrap();
///
/// let breakdown = calculate_working_minutes(&span, None, &BreakRules::default());
/// assert_eq!(breakdown.total_minutes, 541);
/// assert_eq!(breakdown.break_minutes, 60);
/// assert_eq!(breakdown.break_source, BreakSource::Statutory);
/// assert_eq!(breakdown.working_minutes, 481);
/// ```
pub fn calculate_working_minutes(
    span: &TimeSpan,
    explicit_break: Option<&MinutesValue>,
    rules: &BreakRules,
) -> WorkingTimeBreakdown {
    let total_minutes = span.total_minutes();
    let statutory = determine_required_break(total_minutes, rules, 1);

    let explicit = normalize_minutes_value(explicit_break).filter(|minutes| *minutes >= 0.0);
    let (raw_break, break_source) = match explicit {
        Some(minutes) => (minutes, BreakSource::Explicit),
        None => {
            debug!(
                total_minutes,
                required_minutes = statutory.required_minutes,
                "No usable explicit break, assuming statutory minimum"
            );
            (f64::from(statutory.required_minutes), BreakSource::Statutory)
        }
    };

    // Clamp before flooring so fractional breaks never exceed the span.
    let break_minutes = raw_break.clamp(0.0, total_minutes as f64).floor() as i64;
    let working_minutes = (total_minutes - break_minutes).max(0);

    let deduction = AuditStep {
        step_number: 2,
        rule_id: "break_deduction".to_string(),
        rule_name: "Break Deduction".to_string(),
        clause_ref: rules.clause.clone(),
        input: serde_json::json!({
            "total_minutes": total_minutes,
            "explicit_break_minutes": explicit,
            "break_source": break_source,
        }),
        output: serde_json::json!({
            "break_minutes": break_minutes,
            "working_minutes": working_minutes,
        }),
        reasoning: match break_source {
            BreakSource::Explicit => format!(
                "Recorded break of {} minutes deducted from {} minutes",
                break_minutes, total_minutes
            ),
            BreakSource::Statutory => format!(
                "No recorded break, statutory {} minutes deducted from {} minutes",
                break_minutes, total_minutes
            ),
        },
    };

    WorkingTimeBreakdown {
        total_minutes,
        break_minutes,
        break_source,
        working_minutes,
        audit_steps: vec![statutory.audit_step, deduction],
    }
}

/// Formats net working time for display, never failing.
///
/// Returns `"0:00"` when either timestamp is missing or unparseable, or when
/// clock-out is not after clock-in.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::calculate_working_time;
/// use kintai_core::models::MinutesValue;
///
/// assert_eq!(
///     calculate_working_time(Some("2024-03-05T09:00"), Some("2024-03-05T18:01"), None),
///     "8:01"
/// );
/// assert_eq!(
///     calculate_working_time(
///         Some("2024-03-05T09:00"),
///         Some("2024-03-05T18:00"),
///         Some(&MinutesValue::from("0:45"))
///     ),
///     "8:15"
/// );
/// assert_eq!(calculate_working_time(None, Some("2024-03-05T18:00"), None), "0:00");
/// ```
pub fn calculate_working_time(
    clock_in: Option<&str>,
    clock_out: Option<&str>,
    explicit_break: Option<&MinutesValue>,
) -> String {
    match span_from_text(clock_in, clock_out) {
        Some(span) => {
            let breakdown = calculate_working_minutes(&span, explicit_break, &BreakRules::default());
            format_minutes(breakdown.working_minutes)
        }
        None => "0:00".to_string(),
    }
}

/// Formats minutes elapsed since clock-in at `now`, never failing.
///
/// Returns `"0:00"` when clock-in is missing, unparseable or in the future.
pub fn calculate_elapsed_time(clock_in: Option<&str>, now: NaiveDateTime) -> String {
    let Some(start) = clock_in.and_then(|text| parse_instant(text).ok()) else {
        return "0:00".to_string();
    };
    if now < start {
        return "0:00".to_string();
    }
    format_minutes((now - start).num_minutes())
}

fn span_from_text(clock_in: Option<&str>, clock_out: Option<&str>) -> Option<TimeSpan> {
    let start = parse_instant(clock_in?).ok()?;
    let end = parse_instant(clock_out?).ok()?;
    match TimeSpan::new(start, end) {
        Ok(span) => Some(span),
        Err(err) => {
            debug!(error = %err, "Clocked span rejected");
            None
        }
    }
}

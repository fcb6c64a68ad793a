//! Conversion between minute counts and their textual forms.
//!
//! Durations are carried as whole minutes internally and shown as `H:MM`
//! (hours unpadded, minutes zero-padded). The parsers here cover the two
//! boundaries where text enters the engine: permissive display strings and
//! strictly validated form inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::MinutesValue;

static CLOCK_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):([0-5]\d)$").expect("valid regex"));

static CLOCK_DURATION_WITH_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):([0-5]\d):([0-5]\d)$").expect("valid regex")
});

static ISO_8601_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid regex")
});

/// Formats a signed minute count as `H:MM`.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::format_minutes;
///
/// assert_eq!(format_minutes(0), "0:00");
/// assert_eq!(format_minutes(481), "8:01");
/// assert_eq!(format_minutes(-30), "-0:30");
/// assert_eq!(format_minutes(1500), "25:00");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.unsigned_abs();
    format!("{}{}:{:02}", sign, abs / 60, abs % 60)
}

/// Formats a possibly missing, possibly fractional minute count.
///
/// Missing and non-finite values render as `"0:00"`. Fractions round half
/// up (`-2.5` becomes `-2`, `2.5` becomes `3`).
///
/// # Example
///
/// ```
/// use kintai_core::calculation::format_minutes_to_time;
///
/// assert_eq!(format_minutes_to_time(None), "0:00");
/// assert_eq!(format_minutes_to_time(Some(f64::NAN)), "0:00");
/// assert_eq!(format_minutes_to_time(Some(89.5)), "1:30");
/// ```
pub fn format_minutes_to_time(minutes: Option<f64>) -> String {
    match minutes {
        Some(value) if value.is_finite() => format_minutes(round_half_up(value)),
        _ => "0:00".to_string(),
    }
}

/// Parses an `H:MM` display string into minutes, never failing.
///
/// Anything other than exactly two `:`-separated parts yields `0`. Each part
/// is read as its leading integer (optional sign, then digits), and a part
/// without one counts as `0`.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::time_string_to_minutes;
///
/// assert_eq!(time_string_to_minutes("8:01"), 481);
/// assert_eq!(time_string_to_minutes("125:30"), 7530);
/// assert_eq!(time_string_to_minutes("8"), 0);
/// assert_eq!(time_string_to_minutes("1:02:03"), 0);
/// assert_eq!(time_string_to_minutes("x:15"), 15);
/// ```
pub fn time_string_to_minutes(text: &str) -> i64 {
    let parts: Vec<&str> = text.split(':').collect();
    let [hours, minutes] = parts.as_slice() else {
        return 0;
    };
    leading_integer(hours)
        .saturating_mul(60)
        .saturating_add(leading_integer(minutes))
}

/// Parses a form input in strict `H:MM` or `HH:MM` form.
///
/// Surrounding whitespace is ignored. Minutes must be `00`–`59`.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::parse_clock_duration;
///
/// assert_eq!(parse_clock_duration("0:30").unwrap(), 30);
/// assert_eq!(parse_clock_duration("01:00").unwrap(), 60);
/// assert!(parse_clock_duration("1:60").is_err());
/// assert!(parse_clock_duration("30").is_err());
/// ```
pub fn parse_clock_duration(text: &str) -> EngineResult<u32> {
    let invalid = || EngineError::InvalidDuration {
        input: text.to_string(),
    };
    let captures = CLOCK_DURATION.captures(text.trim()).ok_or_else(invalid)?;
    let hours: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minutes: u32 = captures[2].parse().map_err(|_| invalid())?;
    Ok(hours * 60 + minutes)
}

/// Reduces a raw minutes field to a number of minutes.
///
/// Accepts numbers, `H:MM`, `H:MM:SS` (seconds rounded to the nearest
/// minute), ISO-8601 `PT#H#M#S` durations and numeric strings. Returns
/// `None` for anything else, for blank strings and for non-finite numbers.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::normalize_minutes_value;
/// use kintai_core::models::MinutesValue;
///
/// assert_eq!(normalize_minutes_value(Some(&MinutesValue::from("1:15"))), Some(75.0));
/// assert_eq!(normalize_minutes_value(Some(&MinutesValue::from("PT1H30M"))), Some(90.0));
/// assert_eq!(normalize_minutes_value(Some(&MinutesValue::from(45_i64))), Some(45.0));
/// assert_eq!(normalize_minutes_value(Some(&MinutesValue::from("soon"))), None);
/// assert_eq!(normalize_minutes_value(None), None);
/// ```
pub fn normalize_minutes_value(value: Option<&MinutesValue>) -> Option<f64> {
    match value? {
        MinutesValue::Number(number) => number.is_finite().then_some(*number),
        MinutesValue::Text(text) => normalize_minutes_text(text),
    }
}

fn normalize_minutes_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(captures) = CLOCK_DURATION.captures(trimmed) {
        let hours = capture_number(captures.get(1));
        let minutes = capture_number(captures.get(2));
        return Some(hours * 60.0 + minutes);
    }

    if let Some(captures) = CLOCK_DURATION_WITH_SECONDS.captures(trimmed) {
        let hours = capture_number(captures.get(1));
        let minutes = capture_number(captures.get(2));
        let seconds = capture_number(captures.get(3));
        return Some(hours * 60.0 + minutes + seconds_to_minutes(seconds));
    }

    if let Some(captures) = ISO_8601_DURATION.captures(trimmed) {
        if captures.iter().skip(1).all(|group| group.is_none()) {
            debug!(input = %trimmed, "ISO-8601 duration without components");
            return None;
        }
        let hours = capture_number(captures.get(1));
        let minutes = capture_number(captures.get(2));
        let seconds = capture_number(captures.get(3));
        return Some(hours * 60.0 + minutes + seconds_to_minutes(seconds));
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            debug!(input = %trimmed, "Unrecognized minutes value");
            None
        }
    }
}

fn capture_number(group: Option<regex::Match<'_>>) -> f64 {
    group
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn seconds_to_minutes(seconds: f64) -> f64 {
    (seconds / 60.0 + 0.5).floor()
}

/// Rounds to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// The leading integer of `text`: optional whitespace, an optional sign,
/// then digits. Returns `0` when there are no digits.
fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
    if negative { -value } else { value }
}

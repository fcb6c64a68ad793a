//! Date-range expansion at the form boundary.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::DateRange;

/// Default cap on the number of days a single request may span.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 366;

/// Expands form dates into every date they cover, never failing.
///
/// A missing or blank end means a single day. Returns an empty list when
/// either bound is unparseable, when the end is before the start, or when the
/// range is longer than [`DEFAULT_MAX_RANGE_DAYS`].
///
/// # Example
///
/// ```
/// use kintai_core::calculation::expand_date_range;
///
/// let dates = expand_date_range("2024-01-01", Some("2024-01-03"));
/// assert_eq!(dates.len(), 3);
/// assert!(expand_date_range("2024-01-03", Some("2024-01-01")).is_empty());
/// assert_eq!(expand_date_range("2024-01-01", None).len(), 1);
/// ```
pub fn expand_date_range(start: &str, end: Option<&str>) -> Vec<NaiveDate> {
    let expanded = DateRange::parse(start, end).and_then(|range| range.expand(DEFAULT_MAX_RANGE_DAYS));
    match expanded {
        Ok(dates) => dates,
        Err(err) => {
            warn!(start = %start, end = ?end, error = %err, "Date range not expanded");
            Vec::new()
        }
    }
}

/// Formats a date as `YYYY/MM/DD` for user-facing messages.
///
/// ```
/// use kintai_core::calculation::format_date_for_display;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_date_for_display(date), "2024/03/05");
/// ```
pub fn format_date_for_display(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Formats dates as `YYYY/MM/DD` joined by `", "`.
pub fn format_dates_for_display(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| format_date_for_display(*date))
        .collect::<Vec<_>>()
        .join(", ")
}

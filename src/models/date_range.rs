//! Inclusive calendar date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored and any time part after a `T` or a space is
/// dropped, so full timestamps such as `2024-03-05T09:00:00` yield their date.
///
/// # Example
///
/// ```
/// use kintai_core::models::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(parse_calendar_date("2024-03-05").unwrap(), expected);
/// assert_eq!(parse_calendar_date(" 2024-03-05T09:00:00 ").unwrap(), expected);
/// assert!(parse_calendar_date("2024-02-30").is_err());
/// ```
pub fn parse_calendar_date(text: &str) -> EngineResult<NaiveDate> {
    let trimmed = text.trim();
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        input: text.to_string(),
    })
}

/// An inclusive range of calendar dates with `end >= start`.
///
/// # Example
///
/// ```
/// use kintai_core::models::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let range = DateRange::new(start, end).unwrap();
///
/// assert_eq!(range.days(), 3);
/// assert_eq!(range.expand(366).unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeParts")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct DateRangeParts {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeParts> for DateRange {
    type Error = EngineError;

    fn try_from(parts: DateRangeParts) -> EngineResult<Self> {
        Self::new(parts.start, parts.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parses both bounds; a missing or blank end means a single day.
    pub fn parse(start: &str, end: Option<&str>) -> EngineResult<Self> {
        let start_date = parse_calendar_date(start)?;
        let end_date = match end.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => parse_calendar_date(text)?,
            None => start_date,
        };
        Self::new(start_date, end_date)
    }

    /// First day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Ascending iterator over every day in the range.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|date| *date <= self.end)
    }

    /// Every date in the range, refusing ranges longer than `max_days`.
    pub fn expand(&self, max_days: u32) -> EngineResult<Vec<NaiveDate>> {
        let days = self.days();
        if days > i64::from(max_days) {
            return Err(EngineError::DateRangeTooLong { days, max_days });
        }
        Ok(self.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_end_before_start_rejected() {
        match DateRange::new(date("2024-01-03"), date("2024-01-01")) {
            Err(EngineError::InvalidDateRange { start, end }) => {
                assert_eq!(start, date("2024-01-03"));
                assert_eq!(end, date("2024-01-01"));
            }
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_expand_crosses_month_and_leap_day() {
        let range = DateRange::new(date("2024-02-28"), date("2024-03-01")).unwrap();
        assert_eq!(
            range.expand(366).unwrap(),
            vec![date("2024-02-28"), date("2024-02-29"), date("2024-03-01")]
        );
    }

    #[test]
    fn test_expand_enforces_cap() {
        let range = DateRange::new(date("2024-01-01"), date("2024-01-10")).unwrap();
        match range.expand(7) {
            Err(EngineError::DateRangeTooLong { days, max_days }) => {
                assert_eq!(days, 10);
                assert_eq!(max_days, 7);
            }
            other => panic!("Expected DateRangeTooLong, got {:?}", other),
        }
        assert_eq!(range.expand(10).unwrap().len(), 10);
    }

    #[test]
    fn test_single_day() {
        let range = DateRange::single(date("2024-01-02"));
        assert_eq!(range.days(), 1);
        assert!(range.contains(date("2024-01-02")));
        assert!(!range.contains(date("2024-01-03")));
    }

    #[test]
    fn test_parse_defaults_end_to_start() {
        let range = DateRange::parse("2024-05-01", None).unwrap();
        assert_eq!(range, DateRange::single(date("2024-05-01")));

        let blank_end = DateRange::parse("2024-05-01", Some("  ")).unwrap();
        assert_eq!(blank_end, DateRange::single(date("2024-05-01")));
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-01-02"}"#).unwrap();
        assert_eq!(ok.days(), 2);

        let inverted =
            serde_json::from_str::<DateRange>(r#"{"start":"2024-01-02","end":"2024-01-01"}"#);
        assert!(inverted.is_err());
    }

    #[test]
    fn test_parse_calendar_date_drops_time_part() {
        let expected = date("2024-03-05");
        assert_eq!(parse_calendar_date("2024-03-05 09:00").unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-05T09:00:00Z").unwrap(), expected);
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("2024/01/01").is_err());
        assert!(parse_calendar_date("tomorrow").is_err());
    }
}

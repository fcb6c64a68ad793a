//! Clock-in/clock-out spans.

use chrono::{DurationRound, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::date_range::DateRange;

/// An ordered pair of instants with `end > start`.
///
/// # Example
///
/// ```
/// use kintai_core::models::TimeSpan;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2024-03-05 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-03-05 18:01:30", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let span = TimeSpan::new(start, end).unwrap();
/// assert_eq!(span.total_minutes(), 541);
/// assert!(TimeSpan::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSpan {
    /// Creates a span, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if end <= start {
            return Err(EngineError::InvalidTimeSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// The clock-in instant.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The clock-out instant.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whole minutes between start and end, rounded down.
    pub fn total_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The span with both ends truncated to the minute.
    ///
    /// Truncation can collapse a sub-minute span; that case is an error.
    pub fn truncated_to_minutes(&self) -> EngineResult<Self> {
        let minute = TimeDelta::minutes(1);
        let start = self.start.duration_trunc(minute).unwrap_or(self.start);
        let end = self.end.duration_trunc(minute).unwrap_or(self.end);
        Self::new(start, end)
    }

    /// The calendar dates from the clock-in date to the clock-out date.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start.date(), self.end.date())
            .unwrap_or_else(|_| DateRange::single(self.start.date()))
    }

    /// Calendar dates touched by the span, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.date_range().iter().collect()
    }
}

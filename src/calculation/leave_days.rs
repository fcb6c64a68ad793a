//! Leave-day arithmetic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DateRange, LeaveGrant, LeaveTimeUnit};

/// Days a request consumes: half a day for half-day units, otherwise every
/// day of the range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use kintai_core::calculation::requested_days;
/// use kintai_core::models::{DateRange, LeaveTimeUnit};
/// use rust_decimal::Decimal;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 8, d).unwrap();
/// let range = DateRange::new(day(13), day(15)).unwrap();
///
/// assert_eq!(requested_days(&range, LeaveTimeUnit::FullDay), Decimal::from(3));
/// assert_eq!(requested_days(&DateRange::single(day(13)), LeaveTimeUnit::HalfAm), Decimal::new(5, 1));
/// ```
pub fn requested_days(range: &DateRange, unit: LeaveTimeUnit) -> Decimal {
    if unit.is_half_day() {
        Decimal::new(5, 1)
    } else {
        Decimal::from(range.days())
    }
}

/// A remaining balance as shown to users: rounded to one decimal place,
/// halves away from zero, and never negative.
pub fn rounded_remaining_days(remaining: Decimal) -> Decimal {
    remaining
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
        .normalize()
}

/// Dates in `range` not covered by any grant, ascending.
///
/// With no grants at all, every date is uncovered.
pub fn uncovered_dates(range: &DateRange, grants: &[LeaveGrant]) -> Vec<NaiveDate> {
    range
        .iter()
        .filter(|date| !grants.iter().any(|grant| grant.covers(*date)))
        .collect()
}

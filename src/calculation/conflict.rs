//! Date conflict detection between requests.
//!
//! An adjustment cannot be filed for a date already held by an active
//! full-day leave request, and vice versa. Half-day leave leaves room for an
//! adjustment on the same day, and rejected or cancelled requests hold nothing.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::ExistingRequest;

/// Returns the candidate dates held by any participating request, ascending
/// and without duplicates.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use kintai_core::calculation::find_conflicting_dates;
/// use kintai_core::models::{DateRange, ExistingRequest, LeaveTimeUnit, RequestStatus};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let candidates: BTreeSet<_> = [day(2)].into_iter().collect();
/// let approved = ExistingRequest {
///     status: RequestStatus::Approved,
///     spans: vec![DateRange::new(day(1), day(3)).unwrap()],
///     time_unit: LeaveTimeUnit::FullDay,
/// };
///
/// assert_eq!(find_conflicting_dates(&candidates, &[approved]), vec![day(2)]);
/// ```
pub fn find_conflicting_dates(
    candidates: &BTreeSet<NaiveDate>,
    other_requests: &[ExistingRequest],
) -> Vec<NaiveDate> {
    let participating: Vec<&ExistingRequest> = other_requests
        .iter()
        .filter(|request| request.participates_in_conflicts())
        .collect();

    candidates
        .iter()
        .copied()
        .filter(|date| {
            participating
                .iter()
                .any(|request| request.spans.iter().any(|span| span.contains(*date)))
        })
        .collect()
}

//! Existing requests as seen by the conflict checks.
//!
//! The backend returns leave and adjustment requests in several shapes and
//! names the same date under many different keys. The record types here accept
//! what arrives on the wire and normalize it into a single [`ExistingRequest`]
//! before anything in the calculation core looks at it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::date_range::{DateRange, parse_calendar_date};
use super::leave::LeaveTimeUnit;

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Submitted and awaiting approval.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

impl RequestStatus {
    /// Case-insensitive parse of an upstream status string.
    ///
    /// ```
    /// use kintai_core::models::RequestStatus;
    ///
    /// assert_eq!(RequestStatus::parse("approved"), Some(RequestStatus::Approved));
    /// assert_eq!(RequestStatus::parse("DRAFT"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(RequestStatus::Pending),
            "APPROVED" => Some(RequestStatus::Approved),
            "REJECTED" => Some(RequestStatus::Rejected),
            "CANCELLED" | "CANCELED" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }

    /// Pending and approved requests still hold their dates.
    pub fn is_active(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Approved)
    }
}

/// Canonical read-only view of another request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRequest {
    /// Current status.
    pub status: RequestStatus,
    /// Date spans the request occupies.
    pub spans: Vec<DateRange>,
    /// Portion of the day covered.
    #[serde(default)]
    pub time_unit: LeaveTimeUnit,
}

impl ExistingRequest {
    /// Whether this request can block dates of another submission.
    ///
    /// Only active, full-day requests count; a half-day leave leaves room for
    /// an adjustment on the same date.
    pub fn participates_in_conflicts(&self) -> bool {
        self.status.is_active() && !self.time_unit.is_half_day()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_status(value: &Option<String>) -> Option<RequestStatus> {
    let status = non_blank(value).and_then(RequestStatus::parse);
    if status.is_none() {
        debug!(status = ?value, "Skipping request with unknown status");
    }
    status
}

/// A leave request as returned by `/api/leave/requests/{employeeId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveRequestRecord {
    /// Status string.
    pub status: Option<String>,
    /// First day.
    pub start_date: Option<String>,
    /// Last day.
    pub end_date: Option<String>,
    /// Single-day form used by older records.
    pub date: Option<String>,
    /// `FULL_DAY`, `HALF_AM` or `HALF_PM`.
    pub time_unit: Option<String>,
}

impl LeaveRequestRecord {
    /// Normalizes the record.
    ///
    /// The span starts at `startDate`, falling back to `date`, and ends at
    /// `endDate`, falling back to `date` and then `startDate`. Returns `None`
    /// when the status is unknown or no usable span can be built.
    pub fn into_existing(self) -> Option<ExistingRequest> {
        let status = parse_status(&self.status)?;
        let start = non_blank(&self.start_date).or(non_blank(&self.date))?;
        let end = non_blank(&self.end_date)
            .or(non_blank(&self.date))
            .or(non_blank(&self.start_date));

        let span = match DateRange::parse(start, end) {
            Ok(span) => span,
            Err(err) => {
                debug!(error = %err, "Skipping leave request without a usable span");
                return None;
            }
        };

        Some(ExistingRequest {
            status,
            spans: vec![span],
            time_unit: non_blank(&self.time_unit)
                .and_then(LeaveTimeUnit::parse)
                .unwrap_or_default(),
        })
    }
}

/// An adjustment (打刻修正) request as returned by the backend.
///
/// Different endpoints name the target date differently; every key observed
/// upstream is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentRequestRecord {
    /// Status string.
    pub status: Option<String>,
    /// Target attendance date.
    pub target_date: Option<String>,
    /// Generic date key.
    pub date: Option<String>,
    /// Attendance record date.
    pub attendance_date: Option<String>,
    /// Clock-in date.
    pub clock_in_date: Option<String>,
    /// Clock-out date.
    pub clock_out_date: Option<String>,
    /// First day of a multi-day adjustment.
    pub start_date: Option<String>,
    /// Last day of a multi-day adjustment.
    pub end_date: Option<String>,
    /// Clock-in before the correction.
    pub original_clock_in: Option<String>,
    /// Clock-out before the correction.
    pub original_clock_out: Option<String>,
    /// Corrected clock-in.
    pub new_clock_in: Option<String>,
    /// Corrected clock-out.
    pub new_clock_out: Option<String>,
    /// First day of the target range.
    pub target_date_start: Option<String>,
    /// Last day of the target range.
    pub target_date_end: Option<String>,
}

impl AdjustmentRequestRecord {
    /// Normalizes the record into the union of every span it names.
    ///
    /// Paired keys (`clockInDate`/`clockOutDate`, `startDate`/`endDate`,
    /// `targetDateStart`/`targetDateEnd`) form ranges; the rest are single
    /// days. A pair that cannot form a range contributes each readable end as
    /// a single day. Unparseable values are skipped. Returns `None` for unknown
    /// statuses or when no date could be read at all.
    pub fn into_existing(self) -> Option<ExistingRequest> {
        let status = parse_status(&self.status)?;

        let singles = [
            &self.target_date,
            &self.date,
            &self.attendance_date,
            &self.original_clock_in,
            &self.original_clock_out,
            &self.new_clock_in,
            &self.new_clock_out,
        ];
        let pairs = [
            (&self.clock_in_date, &self.clock_out_date),
            (&self.start_date, &self.end_date),
            (&self.target_date_start, &self.target_date_end),
        ];

        let mut spans: Vec<DateRange> = singles
            .into_iter()
            .filter_map(non_blank)
            .filter_map(|text| parse_calendar_date(text).ok())
            .map(DateRange::single)
            .collect();

        for (start, end) in pairs {
            let (start, end) = (non_blank(start), non_blank(end));
            match start.map(|start| DateRange::parse(start, end)) {
                Some(Ok(span)) => spans.push(span),
                // No valid range: keep whichever ends still read as dates.
                _ => spans.extend(
                    [start, end]
                        .into_iter()
                        .flatten()
                        .filter_map(|text| parse_calendar_date(text).ok())
                        .map(DateRange::single),
                ),
            }
        }

        if spans.is_empty() {
            debug!("Skipping adjustment request without any readable date");
            return None;
        }
        spans.sort_by_key(|span| (span.start(), span.end()));
        spans.dedup();

        Some(ExistingRequest {
            status,
            spans,
            time_unit: LeaveTimeUnit::FullDay,
        })
    }
}

/// The response envelopes the request list endpoints use.
///
/// # Example
///
/// ```
/// use kintai_core::models::{LeaveRequestRecord, RequestList};
///
/// let wrapped: RequestList<LeaveRequestRecord> =
///     serde_json::from_str(r#"{"success": true, "data": [{"status": "PENDING", "date": "2024-03-05"}]}"#)
///         .unwrap();
/// let bare: RequestList<LeaveRequestRecord> =
///     serde_json::from_str(r#"[{"status": "PENDING", "date": "2024-03-05"}]"#).unwrap();
///
/// assert_eq!(wrapped.into_records("leave requests").unwrap().len(), 1);
/// assert_eq!(bare.into_records("leave requests").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestList<T> {
    /// `{ "success": bool, "data": [...] }`
    Envelope {
        /// Whether the backend reported success.
        #[serde(default)]
        success: Option<bool>,
        /// The records.
        data: Vec<T>,
    },
    /// A bare JSON array.
    Bare(Vec<T>),
    /// `{ "requests": [...] }`
    Requests {
        /// The records.
        requests: Vec<T>,
    },
    /// `{ "adjustmentRequests": [...] }`
    AdjustmentRequests {
        /// The records.
        #[serde(rename = "adjustmentRequests")]
        adjustment_requests: Vec<T>,
    },
    /// `{ "success": false, "errorCode": ..., "message": ... }` without records.
    Failure {
        /// Whether the backend reported success.
        success: bool,
        /// Backend error code.
        #[serde(default, rename = "errorCode")]
        error_code: Option<String>,
        /// Backend message.
        #[serde(default)]
        message: Option<String>,
    },
}

impl<T> RequestList<T> {
    /// Unwraps the records, treating `success: false` or a body without
    /// records as a failed fetch.
    pub fn into_records(self, source_name: &str) -> EngineResult<Vec<T>> {
        match self {
            RequestList::Envelope {
                success: Some(false),
                ..
            } => Err(EngineError::RequestFetchFailed {
                source_name: source_name.to_string(),
                message: "backend reported success: false".to_string(),
            }),
            RequestList::Envelope { data, .. } => Ok(data),
            RequestList::Bare(records) => Ok(records),
            RequestList::Requests { requests } => Ok(requests),
            RequestList::AdjustmentRequests {
                adjustment_requests,
            } => Ok(adjustment_requests),
            RequestList::Failure {
                success,
                error_code,
                message,
            } => Err(EngineError::RequestFetchFailed {
                source_name: source_name.to_string(),
                message: match (success, error_code, message) {
                    (_, code, Some(message)) => match code {
                        Some(code) => format!("{}: {}", code, message),
                        None => message,
                    },
                    (_, Some(code), None) => code,
                    (false, None, None) => "backend reported success: false".to_string(),
                    (true, None, None) => "backend returned no records".to_string(),
                },
            }),
        }
    }
}

/// Normalizes a fetched leave request list.
pub fn normalize_leave_requests(
    list: RequestList<LeaveRequestRecord>,
) -> EngineResult<Vec<ExistingRequest>> {
    Ok(list
        .into_records("leave requests")?
        .into_iter()
        .filter_map(LeaveRequestRecord::into_existing)
        .collect())
}

/// Normalizes a fetched adjustment request list.
pub fn normalize_adjustment_requests(
    list: RequestList<AdjustmentRequestRecord>,
) -> EngineResult<Vec<ExistingRequest>> {
    Ok(list
        .into_records("adjustment requests")?
        .into_iter()
        .filter_map(AdjustmentRequestRecord::into_existing)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn test_status_activity() {
        assert!(RequestStatus::Pending.is_active());
        assert!(RequestStatus::Approved.is_active());
        assert!(!RequestStatus::Rejected.is_active());
        assert!(!RequestStatus::Cancelled.is_active());
    }

    #[test]
    fn test_half_day_request_does_not_participate() {
        let request = ExistingRequest {
            status: RequestStatus::Approved,
            spans: vec![range("2024-01-01", "2024-01-01")],
            time_unit: LeaveTimeUnit::HalfAm,
        };
        assert!(!request.participates_in_conflicts());
    }

    #[test]
    fn test_leave_record_with_range() {
        let record: LeaveRequestRecord = serde_json::from_str(
            r#"{"id": 7, "status": "approved", "startDate": "2024-01-01", "endDate": "2024-01-03", "timeUnit": "FULL_DAY"}"#,
        )
        .unwrap();
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.status, RequestStatus::Approved);
        assert_eq!(existing.spans, vec![range("2024-01-01", "2024-01-03")]);
        assert_eq!(existing.time_unit, LeaveTimeUnit::FullDay);
    }

    #[test]
    fn test_leave_record_falls_back_to_date() {
        let record = LeaveRequestRecord {
            status: Some("PENDING".to_string()),
            date: Some("2024-02-10".to_string()),
            time_unit: Some("HALF_PM".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.spans, vec![range("2024-02-10", "2024-02-10")]);
        assert_eq!(existing.time_unit, LeaveTimeUnit::HalfPm);
    }

    #[test]
    fn test_leave_record_start_only_is_single_day() {
        let record = LeaveRequestRecord {
            status: Some("PENDING".to_string()),
            start_date: Some("2024-02-10".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.spans, vec![range("2024-02-10", "2024-02-10")]);
    }

    #[test]
    fn test_leave_record_without_dates_is_skipped() {
        let record = LeaveRequestRecord {
            status: Some("PENDING".to_string()),
            ..Default::default()
        };
        assert!(record.into_existing().is_none());
    }

    #[test]
    fn test_leave_record_with_unknown_status_is_skipped() {
        let record = LeaveRequestRecord {
            status: Some("DRAFT".to_string()),
            date: Some("2024-02-10".to_string()),
            ..Default::default()
        };
        assert!(record.into_existing().is_none());
    }

    #[test]
    fn test_adjustment_record_collects_every_date_key() {
        let record: AdjustmentRequestRecord = serde_json::from_str(
            r#"{
                "status": "PENDING",
                "targetDate": "2024-03-05",
                "newClockIn": "2024-03-05T09:00:00",
                "newClockOut": "2024-03-06T01:00:00",
                "targetDateStart": "2024-03-10",
                "targetDateEnd": "2024-03-11"
            }"#,
        )
        .unwrap();
        let existing = record.into_existing().unwrap();
        assert_eq!(
            existing.spans,
            vec![
                range("2024-03-05", "2024-03-05"),
                range("2024-03-06", "2024-03-06"),
                range("2024-03-10", "2024-03-11"),
            ]
        );
    }

    #[test]
    fn test_adjustment_record_clock_dates_form_range() {
        let record = AdjustmentRequestRecord {
            status: Some("APPROVED".to_string()),
            clock_in_date: Some("2024-03-05".to_string()),
            clock_out_date: Some("2024-03-06".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.spans, vec![range("2024-03-05", "2024-03-06")]);
    }

    #[test]
    fn test_adjustment_record_skips_unparseable_dates() {
        let record = AdjustmentRequestRecord {
            status: Some("PENDING".to_string()),
            date: Some("not a date".to_string()),
            attendance_date: Some("2024-04-01".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.spans, vec![range("2024-04-01", "2024-04-01")]);
    }

    #[test]
    fn test_request_list_envelopes() {
        let requests: RequestList<AdjustmentRequestRecord> =
            serde_json::from_str(r#"{"requests": [{"status": "PENDING", "date": "2024-01-01"}]}"#)
                .unwrap();
        assert_eq!(requests.into_records("adjustment requests").unwrap().len(), 1);

        let adjustment: RequestList<AdjustmentRequestRecord> = serde_json::from_str(
            r#"{"adjustmentRequests": [{"status": "PENDING", "date": "2024-01-01"}]}"#,
        )
        .unwrap();
        assert_eq!(adjustment.into_records("adjustment requests").unwrap().len(), 1);
    }

    #[test]
    fn test_request_list_unsuccessful_envelope_is_failure() {
        let list: RequestList<LeaveRequestRecord> =
            serde_json::from_str(r#"{"success": false, "data": []}"#).unwrap();
        match normalize_leave_requests(list) {
            Err(EngineError::RequestFetchFailed { source_name, .. }) => {
                assert_eq!(source_name, "leave requests");
            }
            other => panic!("Expected RequestFetchFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_request_list_failure_body_without_data() {
        let list: RequestList<LeaveRequestRecord> = serde_json::from_str(
            r#"{"success": false, "errorCode": "LEAVE_FETCH_ERROR", "message": "DB down"}"#,
        )
        .unwrap();
        match normalize_leave_requests(list) {
            Err(EngineError::RequestFetchFailed {
                source_name,
                message,
            }) => {
                assert_eq!(source_name, "leave requests");
                assert_eq!(message, "LEAVE_FETCH_ERROR: DB down");
            }
            other => panic!("Expected RequestFetchFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_adjustment_record_inverted_pair_keeps_both_ends() {
        let record = AdjustmentRequestRecord {
            status: Some("APPROVED".to_string()),
            start_date: Some("2024-05-03".to_string()),
            end_date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(
            existing.spans,
            vec![range("2024-05-01", "2024-05-01"), range("2024-05-03", "2024-05-03")]
        );
    }

    #[test]
    fn test_adjustment_record_pair_with_unreadable_end_keeps_start() {
        let record = AdjustmentRequestRecord {
            status: Some("PENDING".to_string()),
            start_date: Some("2024-05-10".to_string()),
            end_date: Some("n/a".to_string()),
            ..Default::default()
        };
        let existing = record.into_existing().unwrap();
        assert_eq!(existing.spans, vec![range("2024-05-10", "2024-05-10")]);
    }

    #[test]
    fn test_malformed_adjustment_pairs_still_block_dates() {
        let list: RequestList<AdjustmentRequestRecord> = serde_json::from_str(
            r#"[
                {"status": "APPROVED", "startDate": "2024-05-03", "endDate": "2024-05-01"},
                {"status": "PENDING", "startDate": "2024-05-10", "endDate": "n/a"}
            ]"#,
        )
        .unwrap();
        let existing = normalize_adjustment_requests(list).unwrap();
        let candidates = [date("2024-05-01"), date("2024-05-03"), date("2024-05-10")]
            .into_iter()
            .collect();
        assert_eq!(
            crate::calculation::find_conflicting_dates(&candidates, &existing),
            vec![date("2024-05-01"), date("2024-05-03"), date("2024-05-10")]
        );
    }

    #[test]
    fn test_normalize_drops_unusable_records() {
        let list: RequestList<LeaveRequestRecord> = serde_json::from_str(
            r#"[
                {"status": "APPROVED", "startDate": "2024-01-01", "endDate": "2024-01-02"},
                {"status": "APPROVED"},
                {"status": "PENDING", "date": "2024-01-05"}
            ]"#,
        )
        .unwrap();
        let existing = normalize_leave_requests(list).unwrap();
        assert_eq!(existing.len(), 2);
    }
}

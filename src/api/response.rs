//! Response types for the attendance rule API.
//!
//! This module defines the success bodies that are specific to the API and
//! the error response structures shared by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{AttendanceMetrics, WorkingTimeBreakdown};
use crate::config::BreakTier;
use crate::error::{EngineError, SubmissionError};
use crate::models::AuditStep;

/// Response body for `POST /working-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingTimeResponse {
    /// Net working time as `H:MM`.
    pub working_time: String,
    /// Minutes and audit steps behind `working_time`.
    #[serde(flatten)]
    pub breakdown: WorkingTimeBreakdown,
    /// Late, early-leave, overtime and late-night minutes.
    pub metrics: AttendanceMetrics,
}

/// Response body for `POST /breaks/required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredBreakResponse {
    /// Minimum break minutes.
    pub required_minutes: u32,
    /// The minimum as `H:MM`.
    pub required_time: String,
    /// The tier that applied, if any.
    pub tier: Option<BreakTier>,
    /// Why the tier applied.
    pub audit_step: AuditStep,
}

/// Response body for `POST /dates/expand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandDatesResponse {
    /// Every date in the range, ascending.
    pub dates: Vec<NaiveDate>,
    /// Number of dates.
    pub days: usize,
}

/// Response body for `POST /conflicts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResponse {
    /// Candidate dates held by an active full-day request, ascending.
    pub conflicting_dates: Vec<NaiveDate>,
    /// The same dates formatted for display.
    pub display: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidDuration { .. }
            | EngineError::InvalidDate { .. }
            | EngineError::InvalidDateTime { .. } => {
                Self::bad_request(ApiError::new("INVALID_INPUT", message))
            }
            EngineError::InvalidTimeSpan { .. } | EngineError::InvalidDateRange { .. } => {
                Self::bad_request(ApiError::new("INVALID_RANGE", message))
            }
            EngineError::DateRangeTooLong { .. } => {
                Self::bad_request(ApiError::new("RANGE_TOO_LONG", message))
            }
            EngineError::RequestFetchFailed { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("UPSTREAM_UNAVAILABLE", message),
            },
        }
    }
}

impl From<SubmissionError> for ApiErrorResponse {
    fn from(error: SubmissionError) -> Self {
        let status = if error.is_upstream_failure() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(error.code(), error.to_string()),
        }
    }
}

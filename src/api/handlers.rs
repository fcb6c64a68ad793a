//! HTTP request handlers for the attendance rule API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeSet;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_attendance_metrics, calculate_working_minutes, determine_required_break,
    find_conflicting_dates, format_dates_for_display, format_minutes, parse_instant,
};
use crate::error::{EngineError, EngineResult, SubmissionError};
use crate::models::{
    DateRange, ExistingRequest, RequestList, SessionContext, TimeSpan,
    normalize_adjustment_requests, normalize_leave_requests,
};
use crate::submission::{
    AdjustmentPayload, CheckedSubmission, LeavePayload, StaticRequestSource, SubmissionGuard,
    ValidatedAdjustment, ValidatedBreakEdit, ValidatedLeave, ValidatedWorkPattern,
    WorkPatternPayload, validate_break_edit,
};

use super::request::{
    AdjustmentCheckRequest, BreakEditRequest, ConflictRequest, ExpandDatesRequest,
    LeaveCheckRequest, RequiredBreakRequest, WorkPatternCheckRequest, WorkingTimeRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ConflictResponse, ExpandDatesResponse, RequiredBreakResponse,
    WorkingTimeResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/working-time", post(working_time_handler))
        .route("/breaks/required", post(required_break_handler))
        .route("/breaks/check", post(break_edit_handler))
        .route("/dates/expand", post(expand_dates_handler))
        .route("/conflicts", post(conflicts_handler))
        .route("/adjustments/check", post(adjustment_check_handler))
        .route("/leave/check", post(leave_check_handler))
        .route("/work-patterns/check", post(work_pattern_check_handler))
        .with_state(state)
}

/// Unwraps a JSON body, mapping extractor rejections to 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn engine_failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request rejected"
    );
    error.into()
}

fn submission_failure(correlation_id: Uuid, error: SubmissionError) -> ApiErrorResponse {
    if error.is_upstream_failure() {
        warn!(
            correlation_id = %correlation_id,
            code = error.code(),
            "Submission blocked, conflict check unavailable"
        );
    } else {
        info!(
            correlation_id = %correlation_id,
            code = error.code(),
            "Submission rejected"
        );
    }
    error.into()
}

/// Normalizes an upstream list. Absent or failed lists become `None`, which
/// the guard treats as an unavailable backend.
fn normalize_list<T>(
    correlation_id: Uuid,
    source_name: &str,
    list: Option<RequestList<T>>,
    normalize: fn(RequestList<T>) -> EngineResult<Vec<ExistingRequest>>,
) -> Option<Vec<ExistingRequest>> {
    let Some(list) = list else {
        warn!(
            correlation_id = %correlation_id,
            source_name,
            "Request list not supplied"
        );
        return None;
    };
    match normalize(list) {
        Ok(requests) => Some(requests),
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %error,
                "Request list unusable"
            );
            None
        }
    }
}

fn parse_span(clock_in: &str, clock_out: &str) -> EngineResult<TimeSpan> {
    TimeSpan::new(parse_instant(clock_in)?, parse_instant(clock_out)?)
}

/// Handler for POST /working-time.
///
/// Returns net working time for a clocked span along with the derived
/// attendance metrics.
async fn working_time_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkingTimeRequest>, JsonRejection>,
) -> ApiResult<WorkingTimeResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working time request");
    let request = parse_body(correlation_id, payload)?;

    let start_time = Instant::now();
    let span = parse_span(&request.clock_in, &request.clock_out)
        .map_err(|error| engine_failure(correlation_id, error))?;

    let rules = state.rules();
    let breakdown = calculate_working_minutes(&span, request.break_minutes.as_ref(), &rules.breaks);
    let metrics = calculate_attendance_metrics(
        &span,
        request.break_minutes.as_ref(),
        &rules.breaks,
        &rules.schedule,
    );

    info!(
        correlation_id = %correlation_id,
        working_minutes = breakdown.working_minutes,
        break_source = ?breakdown.break_source,
        duration_us = start_time.elapsed().as_micros(),
        "Working time calculated"
    );

    Ok(Json(WorkingTimeResponse {
        working_time: format_minutes(breakdown.working_minutes),
        breakdown,
        metrics,
    }))
}

/// Handler for POST /breaks/required.
async fn required_break_handler(
    State(state): State<AppState>,
    payload: Result<Json<RequiredBreakRequest>, JsonRejection>,
) -> ApiResult<RequiredBreakResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let detection = determine_required_break(request.total_minutes, &state.rules().breaks, 1);
    info!(
        correlation_id = %correlation_id,
        total_minutes = request.total_minutes,
        required_minutes = detection.required_minutes,
        "Required break determined"
    );

    Ok(Json(RequiredBreakResponse {
        required_minutes: detection.required_minutes,
        required_time: format_minutes(i64::from(detection.required_minutes)),
        tier: detection.tier,
        audit_step: detection.audit_step,
    }))
}

/// Handler for POST /breaks/check.
async fn break_edit_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakEditRequest>, JsonRejection>,
) -> ApiResult<ValidatedBreakEdit> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let edit = validate_break_edit(
        request.clock_in.as_deref(),
        request.clock_out.as_deref(),
        &request.break_time,
        state.rules(),
    )
    .map_err(|error| submission_failure(correlation_id, error))?;

    info!(
        correlation_id = %correlation_id,
        break_minutes = edit.break_minutes,
        "Break correction accepted"
    );
    Ok(Json(edit))
}

/// Handler for POST /dates/expand.
///
/// Strict counterpart of the lenient expansion used inside the screens:
/// malformed or reversed input is an error, and ranges are capped at the
/// configured request period.
async fn expand_dates_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExpandDatesRequest>, JsonRejection>,
) -> ApiResult<ExpandDatesResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let dates = DateRange::parse(&request.start_date, request.end_date.as_deref())
        .and_then(|range| range.expand(state.rules().limits.max_request_days))
        .map_err(|error| engine_failure(correlation_id, error))?;

    info!(
        correlation_id = %correlation_id,
        days = dates.len(),
        "Date range expanded"
    );
    Ok(Json(ExpandDatesResponse {
        days: dates.len(),
        dates,
    }))
}

/// Handler for POST /conflicts.
async fn conflicts_handler(
    payload: Result<Json<ConflictRequest>, JsonRejection>,
) -> ApiResult<ConflictResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let candidates: BTreeSet<_> = request.candidate_dates.into_iter().collect();
    let conflicting_dates = find_conflicting_dates(&candidates, &request.existing_requests);

    info!(
        correlation_id = %correlation_id,
        candidates = candidates.len(),
        existing = request.existing_requests.len(),
        conflicts = conflicting_dates.len(),
        "Conflicts detected"
    );
    Ok(Json(ConflictResponse {
        display: format_dates_for_display(&conflicting_dates),
        conflicting_dates,
    }))
}

/// Handler for POST /adjustments/check.
///
/// Validates a time adjustment and checks it against the employee's leave
/// requests supplied in the body.
async fn adjustment_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<AdjustmentCheckRequest>, JsonRejection>,
) -> ApiResult<CheckedSubmission<ValidatedAdjustment, AdjustmentPayload>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing adjustment check");
    let request = parse_body(correlation_id, payload)?;

    let leave = normalize_list(
        correlation_id,
        "leave requests",
        request.leave_requests,
        normalize_leave_requests,
    );
    let source = StaticRequestSource {
        leave,
        adjustments: None,
    };
    let guard = SubmissionGuard::new(source, state.rules().clone());
    let ctx = SessionContext {
        employee_id: request.employee_id,
    };

    let checked = guard
        .check_adjustment(&ctx, &request.adjustment)
        .await
        .map_err(|error| submission_failure(correlation_id, error))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %checked.payload.employee_id,
        working_minutes = checked.validated.working_minutes,
        "Adjustment cleared for submission"
    );
    Ok(Json(checked))
}

/// Handler for POST /leave/check.
///
/// Validates a leave request and checks it against the employee's adjustment
/// requests supplied in the body.
async fn leave_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveCheckRequest>, JsonRejection>,
) -> ApiResult<CheckedSubmission<ValidatedLeave, LeavePayload>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave check");
    let request = parse_body(correlation_id, payload)?;

    let adjustments = normalize_list(
        correlation_id,
        "adjustment requests",
        request.adjustment_requests,
        normalize_adjustment_requests,
    );
    let source = StaticRequestSource {
        leave: None,
        adjustments,
    };
    let guard = SubmissionGuard::new(source, state.rules().clone());
    let ctx = SessionContext {
        employee_id: request.employee_id,
    };

    let checked = guard
        .check_leave(&ctx, &request.leave, request.entitlement.as_ref())
        .await
        .map_err(|error| submission_failure(correlation_id, error))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %checked.payload.employee_id,
        requested_days = %checked.validated.requested_days,
        "Leave request cleared for submission"
    );
    Ok(Json(checked))
}

/// Handler for POST /work-patterns/check.
async fn work_pattern_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkPatternCheckRequest>, JsonRejection>,
) -> ApiResult<CheckedSubmission<ValidatedWorkPattern, WorkPatternPayload>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let guard = SubmissionGuard::new(StaticRequestSource::default(), state.rules().clone());
    let ctx = SessionContext {
        employee_id: request.employee_id,
    };
    let checked = guard
        .check_work_pattern(&ctx, &request.pattern)
        .map_err(|error| submission_failure(correlation_id, error))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %checked.payload.employee_id,
        active_days = checked.validated.active_days.len(),
        "Work pattern cleared for submission"
    );
    Ok(Json(checked))
}

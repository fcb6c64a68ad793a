//! HTTP API module for the attendance rule engine.
//!
//! This module exposes the calculations and the pre-submission checks as
//! JSON endpoints, so the attendance screens can preview working time and
//! validate a request before sending it to the backend.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdjustmentCheckRequest, BreakEditRequest, ConflictRequest, ExpandDatesRequest,
    LeaveCheckRequest, RequiredBreakRequest, WorkPatternCheckRequest, WorkingTimeRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, ConflictResponse, ExpandDatesResponse, RequiredBreakResponse,
    WorkingTimeResponse,
};
pub use state::AppState;

pub mod escalate;
pub mod health;
pub mod triage;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ticketflow_core::application::ApiResponse;
use ticketflow_core::TicketError;

/// Turns the stage's transport-agnostic response into an HTTP response.
pub(crate) fn stage_response(response: ApiResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

/// Collaborator failures surface as a structured 500; the caller's retry
/// policy takes it from there.
pub(crate) fn error_response(err: &TicketError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

use super::{error_response, stage_response};
use crate::api::middleware::correlation::CorrelationId;
use crate::api::state::ApiState;
use axum::extract::State;
use axum::response::Response;
use axum::{Extension, Json};
use std::sync::Arc;
use ticketflow_core::application::{dispatch_escalation, EscalationStimulus, ManualEscalate};
use tracing::{error, info};

pub async fn handle_escalate(
    State(state): State<Arc<ApiState>>,
    Extension(correlation): Extension<CorrelationId>,
    Json(body): Json<ManualEscalate>,
) -> Response {
    info!(ticket_id = %body.ticket_id, "escalation request received");
    let ctx = state.stage_context(Some(correlation.0));

    match dispatch_escalation(&ctx, EscalationStimulus::Request(body)).await {
        Ok(Some(response)) => {
            state.metrics.inc_api_request("/tickets/escalate", response.status);
            stage_response(response)
        }
        Ok(None) => {
            state.metrics.inc_api_request("/tickets/escalate", 500);
            error!("escalation stage produced no response for a request stimulus");
            error_response(&ticketflow_core::TicketError::Message("missing stage response".to_string()))
        }
        Err(err) => {
            state.metrics.inc_api_request("/tickets/escalate", 500);
            error!(error = %err, "escalation request failed");
            error_response(&err)
        }
    }
}

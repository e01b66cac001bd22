use crate::api::state::ApiState;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, trace};
use std::sync::Arc;

pub async fn handle_health(State(state): State<Arc<ApiState>>) -> Response {
    let storage_ok = state.store.health_check().is_ok();
    let status = if storage_ok { "healthy" } else { "degraded" };
    if storage_ok {
        trace!("health check: ok");
    } else {
        debug!("health check: degraded storage_ok={}", storage_ok);
    }
    Json(serde_json::json!({
        "status": status,
        "storageOk": storage_ok,
        "uptimeSeconds": state.metrics.uptime().as_secs(),
    }))
    .into_response()
}

pub async fn handle_metrics(State(state): State<Arc<ApiState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => {
            let mut response = body.into_response();
            response
                .headers_mut()
                .insert(axum::http::header::CONTENT_TYPE, HeaderValue::from_static("text/plain; version=0.0.4"));
            response
        }
        Err(err) => {
            debug!("metrics encode failed error={}", err);
            let mut response = format!("metrics_error: {}", err).into_response();
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

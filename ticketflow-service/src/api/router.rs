use super::handlers::escalate::handle_escalate;
use super::handlers::health::{handle_health, handle_metrics};
use super::handlers::triage::handle_triage;
use super::middleware::correlation::correlation_middleware;
use super::middleware::logging::logging_middleware;
use super::state::ApiState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use ticketflow_core::TicketError;
use tokio::net::TcpListener;

pub async fn run_api_server(addr: SocketAddr, state: Arc<ApiState>) -> Result<(), TicketError> {
    info!("binding api server addr={}", addr);
    let app = build_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| TicketError::Message(format!("cannot bind {}: {}", addr, err)))?;
    info!("api server ready and accepting connections addr={}", addr);
    axum::serve(listener, app).await.map_err(|err| {
        error!("api server terminated unexpectedly addr={} error={}", addr, err);
        TicketError::Message(err.to_string())
    })
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/tickets/triage", post(handle_triage))
        .route("/tickets/escalate", post(handle_escalate))
        .route("/health", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(correlation_middleware))
        .with_state(state)
}

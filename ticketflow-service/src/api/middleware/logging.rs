use super::correlation::CorrelationId;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{debug, error, trace, warn};
use std::time::Instant;

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let correlation_id = req.extensions().get::<CorrelationId>().map(|id| id.0.clone());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    let correlation_id = correlation_id.as_deref().unwrap_or("");

    let is_health_like = matches!(path.as_str(), "/health" | "/metrics");
    if is_health_like {
        trace!(
            target: "http",
            "health check correlation_id={} method={} path={} status={} duration_ms={}",
            correlation_id, method, path, status.as_u16(), duration_ms
        );
    } else if status.is_server_error() {
        error!(
            target: "http",
            "request failed correlation_id={} method={} path={} status={} duration_ms={}",
            correlation_id, method, path, status.as_u16(), duration_ms
        );
    } else if status.is_client_error() {
        warn!(
            target: "http",
            "request rejected correlation_id={} method={} path={} status={} duration_ms={}",
            correlation_id, method, path, status.as_u16(), duration_ms
        );
    } else {
        debug!(
            target: "http",
            "request correlation_id={} method={} path={} status={} duration_ms={}",
            correlation_id, method, path, status.as_u16(), duration_ms
        );
    }

    response
}

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-request-id";

/// Correlation id of the in-flight request, inserted as a request extension.
#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

/// Adopts the caller's `x-request-id` or mints a fresh one, and echoes it on
/// the response.
pub async fn correlation_middleware(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(CorrelationId(request_id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

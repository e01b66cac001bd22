use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use ticketflow_core::domain::{Ticket, STATUS_OPEN, TICKETS_NAMESPACE, TOPIC_TICKET_TRIAGED};
use ticketflow_core::foundation::TicketId;
use ticketflow_core::infrastructure::queue::ChannelQueue;
use ticketflow_core::infrastructure::storage::{MemoryTicketStore, TicketStore};
use ticketflow_service::api::{build_router, ApiState};
use ticketflow_service::service::Metrics;
use tower::ServiceExt;

struct TestApi {
    router: Router,
    store: Arc<MemoryTicketStore>,
    queue: Arc<ChannelQueue>,
}

fn test_api() -> TestApi {
    let store = Arc::new(MemoryTicketStore::new());
    let queue = Arc::new(ChannelQueue::new());
    let metrics = Arc::new(Metrics::new().expect("metrics"));
    let state = Arc::new(ApiState { store: store.clone(), events: queue.clone(), metrics });
    TestApi { router: build_router(state), store, queue }
}

async fn seed_open_ticket(store: &MemoryTicketStore, id: &str, title: &str, priority: &str) {
    let ticket = Ticket {
        id: TicketId::from(id),
        title: title.to_string(),
        priority: priority.to_string(),
        status: STATUS_OPEN.to_string(),
        ..Ticket::default()
    };
    store.set(TICKETS_NAMESPACE, &TicketId::from(id), ticket).await.expect("seed ticket");
}

async fn post_json(router: &Router, path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).expect("serialize body")))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_path(router: &Router, path: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method("GET").uri(path).body(Body::empty()).expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    (status, bytes.to_vec())
}

#[tokio::test]
async fn triage_endpoint_patches_and_returns_200() {
    let api = test_api();
    seed_open_ticket(&api.store, "T-1", "printer jam", "low").await;

    let (status, body) = post_json(
        &api.router,
        "/tickets/triage",
        serde_json::json!({ "ticketId": "T-1", "assignee": "alex", "priority": "high" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "ticketId": "T-1", "assignee": "alex", "status": "triaged" }));

    let updated =
        api.store.get(TICKETS_NAMESPACE, &TicketId::from("T-1")).await.expect("get").expect("ticket present");
    assert_eq!(updated.assignee.as_deref(), Some("alex"));
    assert_eq!(updated.priority, "high");
}

#[tokio::test]
async fn triage_endpoint_returns_404_for_unknown_ticket() {
    let api = test_api();

    let (status, body) = post_json(
        &api.router,
        "/tickets/triage",
        serde_json::json!({ "ticketId": "missing-1", "assignee": "alex", "priority": "low" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ticket missing-1 not found");
}

#[tokio::test]
async fn triage_endpoint_rejects_priorities_outside_the_enum() {
    let api = test_api();
    seed_open_ticket(&api.store, "T-1", "printer jam", "low").await;

    let (status, _body) = post_json(
        &api.router,
        "/tickets/triage",
        serde_json::json!({ "ticketId": "T-1", "assignee": "alex", "priority": "urgent" }),
    )
    .await;

    assert!(status.is_client_error());
    let untouched =
        api.store.get(TICKETS_NAMESPACE, &TicketId::from("T-1")).await.expect("get").expect("ticket present");
    assert!(untouched.assignee.is_none());
}

#[tokio::test]
async fn triage_endpoint_publishes_the_event_with_the_stored_title() {
    let api = test_api();
    seed_open_ticket(&api.store, "T-2", "vpn down", "medium").await;
    let mut published = api.queue.subscribe_all();

    let (status, _body) = post_json(
        &api.router,
        "/tickets/triage",
        serde_json::json!({ "ticketId": "T-2", "assignee": "robin", "priority": "critical" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let envelope = published.try_recv().expect("published envelope");
    assert_eq!(envelope.topic, TOPIC_TICKET_TRIAGED);
    assert_eq!(envelope.payload["title"], "vpn down");
    assert_eq!(envelope.payload["priority"], "critical");
}

#[tokio::test]
async fn escalate_endpoint_patches_and_returns_200() {
    let api = test_api();
    seed_open_ticket(&api.store, "T-3", "db latency", "high").await;

    let (status, body) = post_json(
        &api.router,
        "/tickets/escalate",
        serde_json::json!({ "ticketId": "T-3", "reason": "customer VIP" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "ticketId": "T-3",
            "escalatedTo": "engineering-lead",
            "message": "Ticket escalated successfully",
        })
    );

    let updated =
        api.store.get(TICKETS_NAMESPACE, &TicketId::from("T-3")).await.expect("get").expect("ticket present");
    assert_eq!(updated.escalation_reason.as_deref(), Some("customer VIP"));
}

#[tokio::test]
async fn escalate_endpoint_returns_404_for_unknown_ticket() {
    let api = test_api();

    let (status, body) =
        post_json(&api.router, "/tickets/escalate", serde_json::json!({ "ticketId": "missing-2", "reason": "vip" }))
            .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ticket missing-2 not found");
}

#[tokio::test]
async fn health_and_metrics_respond() {
    let api = test_api();

    let (status, body) = get_path(&api.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).expect("health json");
    assert_eq!(json["status"], "healthy");

    // Touch an endpoint so the counter family exists, then scrape.
    let _ = post_json(&api.router, "/tickets/escalate", serde_json::json!({ "ticketId": "x", "reason": "r" })).await;
    let (status, body) = get_path(&api.router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).expect("metrics utf8");
    assert!(text.contains("api_requests_total"));
}

#[tokio::test]
async fn responses_echo_a_correlation_id_header() {
    let api = test_api();
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-request-id", "corr-123")
        .body(Body::empty())
        .expect("request");
    let response = api.router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.headers().get("x-request-id").and_then(|v| v.to_str().ok()), Some("corr-123"));
}

use crate::foundation::Result;
use async_trait::async_trait;

/// Publish contract for downstream events. At-least-once delivery is assumed;
/// the core treats every publish as fire-and-forget.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<()>;
}

use crate::infrastructure::events::EventSink;
use crate::infrastructure::storage::TicketStore;
use std::sync::Arc;

/// Everything a stage operation may touch, passed by parameter. One value is
/// built per stimulus; the correlation id ties its log lines together.
#[derive(Clone)]
pub struct StageContext {
    pub store: Arc<dyn TicketStore>,
    pub events: Arc<dyn EventSink>,
    pub correlation_id: Option<String>,
}

impl StageContext {
    pub fn new(store: Arc<dyn TicketStore>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events, correlation_id: None }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn correlation(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or("-")
    }
}

use crate::service::metrics::Metrics;
use std::sync::Arc;
use ticketflow_core::application::StageContext;
use ticketflow_core::infrastructure::events::EventSink;
use ticketflow_core::infrastructure::storage::TicketStore;

pub struct ApiState {
    pub store: Arc<dyn TicketStore>,
    pub events: Arc<dyn EventSink>,
    pub metrics: Arc<Metrics>,
}

impl ApiState {
    /// Builds the per-request stage context, threading the correlation id
    /// assigned by the middleware.
    pub fn stage_context(&self, correlation_id: Option<String>) -> StageContext {
        let ctx = StageContext::new(self.store.clone(), self.events.clone());
        match correlation_id {
            Some(id) => ctx.with_correlation_id(id),
            None => ctx,
        }
    }
}

use log::debug;
use prometheus::{Encoder, IntCounterVec, Registry, TextEncoder};
use std::time::{Duration, Instant};
use ticketflow_core::TicketError;

pub struct Metrics {
    registry: Registry,
    stage_invocations_total: IntCounterVec,
    api_requests_total: IntCounterVec,
    started_at: Instant,
}

impl Metrics {
    pub fn new() -> Result<Self, TicketError> {
        debug!("initializing prometheus metrics");
        let registry = Registry::new();
        let stage_invocations_total = IntCounterVec::new(
            prometheus::Opts::new("stage_invocations_total", "Stage invocations by stage, stimulus kind and outcome"),
            &["stage", "kind", "outcome"],
        )
        .map_err(|err| TicketError::Message(err.to_string()))?;
        let api_requests_total = IntCounterVec::new(
            prometheus::Opts::new("api_requests_total", "API requests by endpoint and status"),
            &["endpoint", "status"],
        )
        .map_err(|err| TicketError::Message(err.to_string()))?;

        registry.register(Box::new(stage_invocations_total.clone())).map_err(|err| TicketError::Message(err.to_string()))?;
        registry.register(Box::new(api_requests_total.clone())).map_err(|err| TicketError::Message(err.to_string()))?;

        Ok(Self { registry, stage_invocations_total, api_requests_total, started_at: Instant::now() })
    }

    pub fn inc_stage(&self, stage: &str, kind: &str, outcome: &str) {
        self.stage_invocations_total.with_label_values(&[stage, kind, outcome]).inc();
    }

    pub fn inc_api_request(&self, endpoint: &str, status: u16) {
        self.api_requests_total.with_label_values(&[endpoint, &status.to_string()]).inc();
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn encode(&self) -> Result<String, TicketError> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|err| TicketError::Message(err.to_string()))?;
        String::from_utf8(buffer).map_err(|err| TicketError::Message(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_the_encoded_exposition() {
        let metrics = Metrics::new().expect("metrics");
        metrics.inc_stage("triage", "queue", "ok");
        metrics.inc_api_request("/tickets/triage", 200);
        let body = metrics.encode().expect("encode");
        assert!(body.contains("stage_invocations_total"));
        assert!(body.contains("api_requests_total"));
    }
}

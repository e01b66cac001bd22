use crate::service::metrics::Metrics;
use log::{info, warn};
use std::sync::Arc;
use ticketflow_core::application::{dispatch_escalation, dispatch_triage, EscalationStimulus, StageContext, TriageStimulus};
use ticketflow_core::domain::{SlaBreached, TicketCreated, TOPIC_SLA_BREACHED, TOPIC_TICKET_CREATED};
use ticketflow_core::infrastructure::queue::QueueEnvelope;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Consumes queue stimuli one at a time: the next envelope is only taken
/// after the matched branch completes, so in-process delivery behaves as
/// ack-after-completion. Handler errors are logged and the envelope is left
/// to the transport's redelivery policy; the loop itself keeps running.
pub async fn run_queue_loop(ctx: StageContext, metrics: Arc<Metrics>, mut subscription: mpsc::UnboundedReceiver<QueueEnvelope>) {
    info!("queue loop started topics={},{}", TOPIC_TICKET_CREATED, TOPIC_SLA_BREACHED);

    while let Some(envelope) = subscription.recv().await {
        let tick_ctx = ctx.clone().with_correlation_id(Uuid::new_v4().to_string());
        match envelope.topic.as_str() {
            TOPIC_TICKET_CREATED => match serde_json::from_value::<TicketCreated>(envelope.payload) {
                Ok(created) => {
                    match dispatch_triage(&tick_ctx, TriageStimulus::Queue(created)).await {
                        Ok(_) => metrics.inc_stage("triage", "queue", "ok"),
                        Err(err) => {
                            warn!("queue triage handler error error={}", err);
                            metrics.inc_stage("triage", "queue", "error");
                        }
                    }
                }
                Err(err) => warn!("invalid {} payload error={}", TOPIC_TICKET_CREATED, err),
            },
            TOPIC_SLA_BREACHED => match serde_json::from_value::<SlaBreached>(envelope.payload) {
                Ok(breach) => {
                    match dispatch_escalation(&tick_ctx, EscalationStimulus::Queue(breach)).await {
                        Ok(_) => metrics.inc_stage("escalation", "queue", "ok"),
                        Err(err) => {
                            warn!("queue escalation handler error error={}", err);
                            metrics.inc_stage("escalation", "queue", "error");
                        }
                    }
                }
                Err(err) => warn!("invalid {} payload error={}", TOPIC_SLA_BREACHED, err),
            },
            other => {
                // No stage accepts this topic: the subscription is miswired.
                warn!("queue delivered unrecognized topic, check trigger wiring topic={}", other);
            }
        }
    }

    info!("queue loop stopped");
}

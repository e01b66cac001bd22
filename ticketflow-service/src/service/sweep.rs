use crate::service::metrics::Metrics;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use ticketflow_core::application::{dispatch_triage, StageContext, TriageStimulus};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Fires the timer stimulus on a fixed schedule. Ticks missed while a sweep
/// is still running are skipped, not queued up.
pub async fn run_sweep_loop(ctx: StageContext, metrics: Arc<Metrics>, interval_seconds: u64) {
    info!("sweep loop started interval_seconds={}", interval_seconds);
    let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let tick_ctx = ctx.clone().with_correlation_id(Uuid::new_v4().to_string());
        match dispatch_triage(&tick_ctx, TriageStimulus::Timer).await {
            Ok(_) => metrics.inc_stage("triage", "timer", "ok"),
            Err(err) => {
                warn!("sweep failed error={}", err);
                metrics.inc_stage("triage", "timer", "error");
            }
        }
    }
}

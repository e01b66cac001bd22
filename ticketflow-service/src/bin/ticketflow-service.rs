#[path = "ticketflow-service/cli.rs"]
mod cli;
#[path = "ticketflow-service/setup.rs"]
mod setup;

use crate::cli::Cli;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use ticketflow_core::application::StageContext;
use ticketflow_core::domain::{TOPIC_SLA_BREACHED, TOPIC_TICKET_CREATED};
use ticketflow_core::infrastructure::events::EventSink;
use ticketflow_core::infrastructure::queue::ChannelQueue;
use ticketflow_core::TicketError;
use ticketflow_service::api::{run_api_server, ApiState};
use ticketflow_service::service::{run_queue_loop, run_sweep_loop, Metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    setup::init_logging(&args.log_level)?;
    args.apply_to_env();
    info!("ticketflow-service starting log_level={}", args.log_level);

    let app_config = setup::load_app_config()?;
    info!(
        "config loaded api_enabled={} api_addr={} sweep_enabled={} sweep_interval_seconds={}",
        app_config.api.enabled, app_config.api.addr, app_config.sweep.enabled, app_config.sweep.interval_seconds
    );

    let store = setup::init_storage();
    let queue = Arc::new(ChannelQueue::new());
    let events: Arc<dyn EventSink> = queue.clone();
    let metrics = Arc::new(Metrics::new()?);
    let ctx = StageContext::new(store.clone(), events.clone());

    let subscription = queue.subscribe_topics(&[TOPIC_TICKET_CREATED, TOPIC_SLA_BREACHED]);
    let queue_ctx = ctx.clone();
    let queue_metrics = metrics.clone();
    tokio::spawn(async move {
        run_queue_loop(queue_ctx, queue_metrics, subscription).await;
    });

    if app_config.sweep.enabled {
        let sweep_ctx = ctx.clone();
        let sweep_metrics = metrics.clone();
        let interval_seconds = app_config.sweep.interval_seconds;
        tokio::spawn(async move {
            run_sweep_loop(sweep_ctx, sweep_metrics, interval_seconds).await;
        });
    } else {
        warn!("sweep loop disabled by config");
    }

    if app_config.api.enabled {
        let addr: SocketAddr = app_config
            .api
            .addr
            .parse()
            .map_err(|err| TicketError::ConfigError(format!("invalid api.addr {}: {}", app_config.api.addr, err)))?;
        let state = Arc::new(ApiState { store, events, metrics });
        run_api_server(addr, state).await?;
    } else {
        info!("api disabled, running queue and sweep loops only");
        tokio::signal::ctrl_c().await?;
        info!("shutdown signal received");
    }

    Ok(())
}

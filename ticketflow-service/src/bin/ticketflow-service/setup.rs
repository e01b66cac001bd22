use log::warn;
use std::sync::Arc;
use ticketflow_core::infrastructure::config::{load_app_config as load, AppConfig};
use ticketflow_core::infrastructure::storage::MemoryTicketStore;
use ticketflow_core::TicketError;

pub fn init_logging(level: &str) -> Result<(), TicketError> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .map_err(|err| TicketError::Message(err.to_string()))?;
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
    Ok(())
}

pub fn load_app_config() -> Result<AppConfig, TicketError> {
    let app_config = load()?;
    if let Err(errors) = app_config.validate() {
        for err in errors {
            warn!("config validation error: {}", err);
        }
    }
    Ok(app_config)
}

/// The deployment environment supplies the durable keyed store; this process
/// keeps tickets in memory.
pub fn init_storage() -> Arc<MemoryTicketStore> {
    Arc::new(MemoryTicketStore::new())
}

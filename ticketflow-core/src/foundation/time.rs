use crate::foundation::TicketError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Overrides the wall clock when set. Used by tests that need a pinned timestamp.
pub const TEST_NOW_NANOS_ENV: &str = "TICKETFLOW_TEST_NOW_NANOS";

pub fn current_timestamp_nanos_env(env_var: Option<&str>) -> Result<u64, TicketError> {
    if let Some(var) = env_var {
        if let Ok(value) = std::env::var(var) {
            return value.parse::<u64>().map_err(|err| TicketError::Message(err.to_string()));
        }
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| TicketError::Message(err.to_string()))?;
    Ok(now.as_secs().saturating_mul(1_000_000_000).saturating_add(u64::from(now.subsec_nanos())))
}

/// Returns the current wall-clock timestamp in nanoseconds.
pub fn now_nanos() -> u64 {
    current_timestamp_nanos_env(Some(TEST_NOW_NANOS_ENV)).or_else(|_| current_timestamp_nanos_env(None)).unwrap_or(0)
}

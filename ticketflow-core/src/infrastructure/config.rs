use crate::foundation::{Result, TicketError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "TICKETFLOW_CONFIG_PATH";
pub const API_ADDR_ENV: &str = "TICKETFLOW_API_ADDR";
pub const SWEEP_INTERVAL_ENV: &str = "TICKETFLOW_SWEEP_INTERVAL_SECONDS";

fn default_true() -> bool {
    true
}

fn default_api_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_sweep_interval_seconds() -> u64 {
    300
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_addr")]
    pub addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { enabled: true, addr: default_api_addr() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fixed sweep schedule. The original deployment ran every 5 minutes.
    #[serde(default = "default_sweep_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { enabled: true, interval_seconds: default_sweep_interval_seconds() }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Collects every problem instead of failing on the first one.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.api.enabled && self.api.addr.parse::<SocketAddr>().is_err() {
            errors.push(format!("api.addr is not a socket address: {}", self.api.addr));
        }
        if self.sweep.enabled && self.sweep.interval_seconds == 0 {
            errors.push("sweep.interval_seconds must be greater than zero".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn resolve_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_ENV).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    })
}

/// Loads the TOML config when `TICKETFLOW_CONFIG_PATH` points at one,
/// otherwise starts from defaults; env overrides win either way.
pub fn load_app_config() -> Result<AppConfig> {
    let mut config = match resolve_config_path() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|err| TicketError::ConfigError(format!("cannot read {}: {}", path.display(), err)))?;
            toml::from_str(&raw)?
        }
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(addr) = std::env::var(API_ADDR_ENV) {
        let trimmed = addr.trim();
        if !trimmed.is_empty() {
            config.api.addr = trimmed.to_string();
        }
    }
    if let Ok(interval) = std::env::var(SWEEP_INTERVAL_ENV) {
        let trimmed = interval.trim();
        if !trimmed.is_empty() {
            config.sweep.interval_seconds = trimmed
                .parse::<u64>()
                .map_err(|err| TicketError::ConfigError(format!("invalid {}: {}", SWEEP_INTERVAL_ENV, err)))?;
        }
    }
    Ok(())
}

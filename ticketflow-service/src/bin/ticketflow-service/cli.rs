use clap::Parser;
use std::path::PathBuf;
use ticketflow_core::infrastructure::config;

#[derive(Parser, Debug)]
#[command(name = "ticketflow-service")]
#[command(about = "Support ticket triage and escalation service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override API listen address
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Override sweep interval in seconds
    #[arg(long)]
    pub sweep_interval_seconds: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn apply_to_env(&self) {
        if let Some(config_path) = &self.config {
            std::env::set_var(config::CONFIG_PATH_ENV, config_path);
        }

        if let Some(addr) = &self.addr {
            std::env::set_var(config::API_ADDR_ENV, addr);
        }

        if let Some(interval) = &self.sweep_interval_seconds {
            std::env::set_var(config::SWEEP_INTERVAL_ENV, interval.to_string());
        }
    }
}

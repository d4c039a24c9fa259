use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CLUBHOUSE_BASE_URL")
            .context("CLUBHOUSE_BASE_URL environment variable is required")?;

        let timeout_secs = env::var("CLUBHOUSE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("CLUBHOUSE_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            base_url,
            timeout_secs,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API base URL: {}", self.base_url);
        tracing::info!("  Request timeout: {}s", self.timeout_secs);
    }
}

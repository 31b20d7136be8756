//! Janitor configuration loaded from environment variables
//!
//! Loaded once at startup and passed explicitly to the scheduler; nothing
//! reads the environment after that.

use std::time::Duration;

use anyhow::{Context, Result};
use janitor_shared_config::{parse_env, parse_env_any, ArrConfig, CommonConfig, ConfigError};

/// Default sleep between cycles (10 minutes)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Janitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Service endpoints and log level
    pub common: CommonConfig,

    /// Sleep between cleanup cycles in seconds
    pub poll_interval_secs: u64,

    /// Optional per-request timeout in seconds, never zero
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load service endpoints")?;

        let poll_interval_secs = parse_env_any(
            &["POLL_INTERVAL_SECONDS", "API_TIMEOUT"],
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        if poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "POLL_INTERVAL_SECONDS".to_string(),
                "interval must be at least one second".to_string(),
            )
            .into());
        }

        // 0 means no timeout, same as leaving it unset
        let request_timeout_secs =
            Some(parse_env::<u64>("REQUEST_TIMEOUT_SECONDS", 0)?).filter(|&secs| secs > 0);

        Ok(Self {
            common,
            poll_interval_secs,
            request_timeout_secs,
        })
    }

    /// Sleep between cleanup cycles
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Per-request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Series manager endpoint
    pub fn sonarr(&self) -> &ArrConfig {
        &self.common.sonarr
    }

    /// Movie manager endpoint
    pub fn radarr(&self) -> &ArrConfig {
        &self.common.radarr
    }
}

//! Shared configuration types for the queue janitor
//!
//! This crate provides the connection settings for the managed *arr services
//! and the environment helpers the janitor binary builds its configuration
//! from.

mod arr;
mod error;

pub use arr::{ArrConfig, ServiceKind, API_VERSION};
pub use error::{ConfigError, ConfigResult};

use std::env;

/// Common configuration shared by every janitor component
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Series manager endpoint ("service A")
    pub sonarr: ArrConfig,

    /// Movie manager endpoint ("service B")
    pub radarr: ArrConfig,

    /// Log level (from RUST_LOG or LOG_LEVEL)
    pub log_level: String,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            sonarr: ArrConfig::from_env(ServiceKind::Sonarr)?,
            radarr: ArrConfig::from_env(ServiceKind::Radarr)?,
            log_level: log_level_from_env(),
        })
    }
}

/// Log filter directive from RUST_LOG, then LOG_LEVEL, defaulting to `info`
pub fn log_level_from_env() -> String {
    env::var("RUST_LOG")
        .or_else(|_| env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| "info".to_string())
}

/// Get the first non-blank variable among `names`, with the name it was read from
///
/// A blank value only wins when no other variable holds one. The error names
/// the first (preferred) variable.
pub fn get_required_env_any<'a>(names: &[&'a str]) -> ConfigResult<(&'a str, String)> {
    let mut blank = None;

    for &name in names {
        match env::var(name) {
            Ok(val) if !val.trim().is_empty() => return Ok((name, val)),
            Ok(val) => {
                blank.get_or_insert((name, val));
            }
            Err(_) => {}
        }
    }

    blank.ok_or_else(|| {
        let preferred = names.first().copied().unwrap_or_default();
        ConfigError::MissingEnvVar(preferred.to_string())
    })
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_env_any(&[name], default)
}

/// Parse the first set variable among `names`, or return `default` if none is set
pub fn parse_env_any<T>(names: &[&str], default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    for name in names {
        if let Ok(val) = env::var(name) {
            return val
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e)));
        }
    }
    Ok(default)
}

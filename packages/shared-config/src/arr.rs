//! *arr service (Sonarr/Radarr) connection configuration types

use crate::{get_required_env_any, ConfigError, ConfigResult};

/// REST API version both services are addressed with
pub const API_VERSION: &str = "v3";

/// Which managed service an endpoint points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Series manager ("service A")
    Sonarr,
    /// Movie manager ("service B")
    Radarr,
}

impl ServiceKind {
    /// Environment variable holding the base URL, followed by its legacy alias
    pub fn url_vars(&self) -> [&'static str; 2] {
        match self {
            Self::Sonarr => ["SERVICE_A_URL", "SONARR_URL"],
            Self::Radarr => ["SERVICE_B_URL", "RADARR_URL"],
        }
    }

    /// Environment variable holding the API key, followed by its legacy alias
    pub fn api_key_vars(&self) -> [&'static str; 2] {
        match self {
            Self::Sonarr => ["SERVICE_A_API_KEY", "SONARR_API_KEY"],
            Self::Radarr => ["SERVICE_B_API_KEY", "RADARR_API_KEY"],
        }
    }

    /// Whether this service understands the `missingEpisodeSearch` command
    pub fn supports_missing_episode_search(&self) -> bool {
        matches!(self, Self::Sonarr)
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sonarr => write!(f, "Sonarr"),
            Self::Radarr => write!(f, "Radarr"),
        }
    }
}

/// Connection settings for one managed service
#[derive(Clone)]
pub struct ArrConfig {
    /// Which service this endpoint belongs to
    pub kind: ServiceKind,

    /// Service base URL (without the `/api/v3` suffix)
    pub url: String,

    /// Service API key
    pub api_key: String,
}

impl ArrConfig {
    /// Load the endpoint for `kind` from environment variables
    ///
    /// Both the URL and the API key are required; the `SERVICE_*` names take
    /// precedence over the legacy `SONARR_*`/`RADARR_*` names unless blank.
    /// Errors name the variable the value was read from.
    pub fn from_env(kind: ServiceKind) -> ConfigResult<Self> {
        let (url_var, url) = get_required_env_any(&kind.url_vars())?;
        let (key_var, api_key) = get_required_env_any(&kind.api_key_vars())?;

        if url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                url_var.to_string(),
                "URL cannot be empty".to_string(),
            ));
        }

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                key_var.to_string(),
                "API key cannot be empty".to_string(),
            ));
        }

        let config = Self::new(kind, url.trim(), api_key.trim());
        config.validate_url(url_var)?;
        Ok(config)
    }

    /// Create a configuration with custom URL and API key (useful for testing)
    pub fn new(kind: ServiceKind, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Get the full URL for the API endpoint
    pub fn api_url(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/api/{}/{}", base, API_VERSION, path)
    }

    fn validate_url(&self, var: &str) -> ConfigResult<()> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidUrl(
                var.to_string(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }
}

impl std::fmt::Debug for ArrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrConfig")
            .field("kind", &self.kind)
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

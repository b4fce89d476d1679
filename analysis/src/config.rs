//! Upstream analysis service configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8090";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading [`ServiceConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("ANALYSIS_SERVICE_URL must start with http:// or https://, got '{0}'")]
    InvalidServiceUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Origin of the analysis service, without a trailing `/`.
    pub base_url: String,
    /// Bounds connection establishment only. Requests themselves never time out.
    pub connect_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_SERVICE_URL.to_owned(), connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl ServiceConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `ANALYSIS_SERVICE_URL`: default `http://localhost:8090`
    /// - `ANALYSIS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("ANALYSIS_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_owned());
        let connect_timeout_secs = env_parse_u64("ANALYSIS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS);
        Self::new(&base_url, connect_timeout_secs)
    }

    /// Validate and normalize an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str, connect_timeout_secs: u64) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidServiceUrl(base_url.to_owned()));
        }
        Ok(Self { base_url: trimmed.to_owned(), connect_timeout_secs })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

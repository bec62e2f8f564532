//! Client configuration, built in code or loaded from TOML.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://app.getswift.co/api/v2";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Settings shared by every service of a client.
///
/// ```toml
/// api_key = "6a0f1e4c-0b5e-4c5f-9d84-0a3c2f8e7b11"
/// base_url = "https://app.getswift.co/api/v2"
/// timeout_ms = 10000
/// proxy = "http://proxy.internal:3128"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetSwiftConfig {
    /// Merchant key used when neither the call nor the service sets one.
    pub api_key: Option<Uuid>,
    /// API root URL.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Proxy URL for every request.
    pub proxy: Option<String>,
}

impl Default for GetSwiftConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            proxy: None,
        }
    }
}

impl GetSwiftConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed or validated.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GetSwiftConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Uuid) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the API root URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Routes every request through a proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parsed API root, always ending in `/` so relative paths join under it.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the URL is not absolute HTTP(S).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!("base_url '{}' is invalid: {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url '{}' must use http or https",
                self.base_url
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_ms must be positive".to_string(),
            ));
        }

        if let Some(proxy) = &self.proxy
            && Url::parse(proxy).is_err()
        {
            return Err(ConfigError::InvalidValue(format!(
                "proxy '{proxy}' is not a valid URL"
            )));
        }

        Ok(())
    }
}

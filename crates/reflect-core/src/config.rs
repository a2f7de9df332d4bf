//! Client configuration.
//!
//! Values are resolved in increasing precedence:
//! built-in defaults, `~/.config/reflect/config.toml`, environment variables,
//! and finally explicit overrides from the command line.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ReflectError, Result};

/// Where the analysis service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the analysis endpoint, relative to the base URL.
pub const ANALYZE_PATH: &str = "/analyze";

/// Overrides the base URL.
pub const ENV_API_URL: &str = "REFLECT_API_URL";

/// Overrides the request timeout, in whole seconds.
pub const ENV_REQUEST_TIMEOUT: &str = "REFLECT_REQUEST_TIMEOUT_SECS";

/// Root structure of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigRoot {
    #[serde(default)]
    pub client: ClientConfig,
}

/// How to reach the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport-level timeout. `None` leaves the HTTP client's default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Loads the default config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let config = match default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Loads `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ReflectError::io(path, &e))?;
        let root: ConfigRoot = toml::from_str(&content)?;
        root.client.validated()
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ReflectError::config(format!(
                    "{ENV_REQUEST_TIMEOUT} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            self.request_timeout_secs = Some(secs);
        }
        self.validated()
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validated()
    }

    /// Overrides the request timeout.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }

    fn validated(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim().to_string();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ReflectError::config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ReflectError::config(
                "request_timeout_secs must be greater than zero",
            ));
        }
        Ok(self)
    }
}

/// Returns `~/.config/reflect/config.toml`, or `None` without a home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("reflect").join("config.toml"))
}

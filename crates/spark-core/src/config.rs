//! Portal configuration.
//!
//! Resolved once at startup from defaults, an optional TOML file, the
//! environment and command-line overrides, then shared read-only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Default donation API URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default portal bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Organization shown when none is given.
pub const DEFAULT_ORG: &str = "spark";

/// Environment variables read during resolution.
pub const ENV_API_URL: &str = "SPARK_API_URL";
pub const ENV_API_TIMEOUT: &str = "SPARK_API_TIMEOUT";
pub const ENV_DEFAULT_ORG: &str = "SPARK_DEFAULT_ORG";

/// Connection settings for the donation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

/// Bind address of the portal server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete portal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub default_org: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            default_org: DEFAULT_ORG.to_string(),
        }
    }
}

/// Values given explicitly on the command line. They win over everything.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_org: Option<String>,
}

impl PortalConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> ApiResult<Self> {
        toml::from_str(source).map_err(|e| ApiError::config(format!("Invalid config file: {}", e)))
    }

    /// Load a TOML config file.
    pub fn load_file(path: &Path) -> ApiResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ApiError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Location of the per-user config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spark").join("config.toml"))
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(mut self, lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| {
                ApiError::config(format!("{} must be a number of seconds, got '{}'", ENV_API_TIMEOUT, raw))
            })?;
        }
        if let Some(org) = lookup(ENV_DEFAULT_ORG).filter(|v| !v.trim().is_empty()) {
            self.default_org = org;
        }
        Ok(self)
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.api.base_url = url;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.api.timeout_secs = timeout;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(org) = overrides.default_org {
            self.default_org = org;
        }
        self
    }

    /// Check values and normalize the API URL (no trailing slash).
    pub fn validate(mut self) -> ApiResult<Self> {
        let url = self.api.base_url.trim().trim_end_matches('/').to_string();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| {
                ApiError::config(format!(
                    "API URL must start with http:// or https://, got '{}'",
                    self.api.base_url
                ))
            })?;
        if host.is_empty() {
            return Err(ApiError::config("API URL has no host"));
        }
        if self.api.timeout_secs == 0 {
            return Err(ApiError::config("API timeout must be greater than zero"));
        }
        if self.default_org.trim().is_empty() {
            self.default_org = DEFAULT_ORG.to_string();
        }
        self.api.base_url = url;
        Ok(self)
    }

    /// Resolve the configuration: defaults, then the config file (explicit
    /// path, or the per-user file when it exists), then the environment,
    /// then `overrides`.
    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> ApiResult<Self> {
        let base = match file {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::load_file(&path)?,
                None => Self::default(),
            },
        };

        let config = base
            .apply_env(|key| std::env::var(key).ok())?
            .apply_overrides(overrides)
            .validate()?;

        debug!(api_url = %config.api.base_url, timeout = config.api.timeout_secs, "Configuration resolved");
        Ok(config)
    }
}

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::RetryPolicy;
use crate::cache::CachePolicy;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. billwatch.yaml file (if exists)
/// 3. Environment variables with BW_ prefix (always wins)
///
/// It is read once at startup; nothing reloads it at runtime.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL of the bills API (the `/api/v1` prefix is added per request).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Serve the bundled mock dataset instead of calling the API.
    /// Enable via `BW_API__MOCK_MODE=true`.
    #[serde(default)]
    pub mock_mode: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound on any single retry delay.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl RetryConfig {
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds a cached result is served without refetching.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,

    /// Seconds without access after which a cached result is dropped.
    #[serde(default = "default_gc_secs")]
    pub gc_secs: u64,
}

impl CacheConfig {
    #[must_use]
    pub const fn policy(&self) -> CachePolicy {
        CachePolicy {
            stale_after: Duration::from_secs(self.stale_secs),
            evict_after: Duration::from_secs(self.gc_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error) or a full `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_retries() -> u32 {
    2
}

#[allow(clippy::missing_const_for_fn)]
fn default_base_delay_ms() -> u64 {
    1_000
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_delay_ms() -> u64 {
    30_000
}

#[allow(clippy::missing_const_for_fn)]
fn default_stale_secs() -> u64 {
    5 * 60
}

#[allow(clippy::missing_const_for_fn)]
fn default_gc_secs() -> u64 {
    30 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mock_mode: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            gc_secs: default_gc_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. billwatch.yaml file (if exists)
    /// 3. Environment variables with BW_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("billwatch.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("BW_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The base URL only matters when we actually call the API
        if !self.api.mock_mode {
            let url = self.api.base_url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "api.base_url must start with http:// or https://, got: '{}'. Set BW_API__BASE_URL or enable BW_API__MOCK_MODE.",
                    self.api.base_url
                )));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".into(),
            ));
        }

        if self.retry.max_delay_ms < self.retry.base_delay_ms {
            return Err(ConfigError::Validation(format!(
                "retry.max_delay_ms ({}) cannot be less than retry.base_delay_ms ({})",
                self.retry.max_delay_ms, self.retry.base_delay_ms
            )));
        }

        if self.cache.gc_secs < self.cache.stale_secs {
            return Err(ConfigError::Validation(format!(
                "cache.gc_secs ({}) cannot be less than cache.stale_secs ({})",
                self.cache.gc_secs, self.cache.stale_secs
            )));
        }

        Ok(())
    }
}

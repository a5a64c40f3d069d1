//! Client configuration.
//!
//! Configuration is stored in `$BITEBOX_HOME/config.yaml` and includes:
//! - Backend base address and optional path prefix
//! - Cookie (credentials) and timeout settings for the HTTP gateway
//! - Listing defaults: page size, search debounce, price bucket thresholds

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::collection::filters::PriceThresholds;
use crate::error::{ApiError, Result};
use crate::fs::{bitebox_home, write_file_atomic};

/// Environment variable that overrides the configured backend address.
pub const API_URL_ENV: &str = "BITEBOX_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "api_prefix",
    "with_credentials",
    "timeout_secs",
    "connect_timeout_secs",
    "login_route",
    "page_size",
    "search_debounce_ms",
    "price.low",
    "price.high",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base address (default: http://localhost:8080)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path prefix prepended to every endpoint, e.g. `/api` (default: none)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_prefix: String,

    /// Send and keep cookies on every request (default: true)
    #[serde(default = "default_with_credentials")]
    pub with_credentials: bool,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Route the gateway navigates to when the session is rejected
    #[serde(default = "default_login_route")]
    pub login_route: String,

    /// Items per page for listings (default: 12)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delay before a search-triggered fetch is issued (default: 400)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default)]
    pub price_thresholds: PriceThresholds,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_with_credentials() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_page_size() -> usize {
    12
}

fn default_search_debounce_ms() -> u64 {
    400
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_prefix: String::new(),
            with_credentials: default_with_credentials(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            login_route: default_login_route(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            price_thresholds: PriceThresholds::default(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        bitebox_home().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ApiError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let content = serde_yaml_ng::to_string(self)?;
        write_file_atomic(&Self::config_path(), &content)
    }

    /// Backend address, `BITEBOX_API_URL` taking precedence over the file.
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url.trim().to_string();
        }
        self.api_url.clone()
    }

    /// Parsed backend address.
    pub fn base_url(&self) -> Result<Url> {
        parse_base_url(&self.api_url())
    }

    pub fn validate(&self) -> Result<()> {
        parse_base_url(&self.api_url)?;
        if self.page_size == 0 {
            return Err(ApiError::Config("page_size must be at least 1".to_string()));
        }
        if !self.price_thresholds.low.is_finite() || !self.price_thresholds.high.is_finite() {
            return Err(ApiError::Config(
                "price.low and price.high must be finite numbers".to_string(),
            ));
        }
        if self.price_thresholds.low > self.price_thresholds.high {
            return Err(ApiError::Config(format!(
                "price.low ({}) must not exceed price.high ({})",
                self.price_thresholds.low, self.price_thresholds.high
            )));
        }
        if !self.login_route.starts_with('/') {
            return Err(ApiError::Config(format!(
                "login_route '{}' must start with '/'",
                self.login_route
            )));
        }
        Ok(())
    }

    /// Read a single value by key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "api_prefix" => self.api_prefix.clone(),
            "with_credentials" => self.with_credentials.to_string(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "connect_timeout_secs" => self.connect_timeout_secs.to_string(),
            "login_route" => self.login_route.clone(),
            "page_size" => self.page_size.to_string(),
            "search_debounce_ms" => self.search_debounce_ms.to_string(),
            "price.low" => self.price_thresholds.low.to_string(),
            "price.high" => self.price_thresholds.high.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single value by key. The result is validated before returning.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api_url" => {
                parse_base_url(value)?;
                self.api_url = value.to_string();
            }
            "api_prefix" => self.api_prefix = value.trim_end_matches('/').to_string(),
            "with_credentials" => self.with_credentials = parse_value(key, value)?,
            "timeout_secs" => self.timeout_secs = parse_value(key, value)?,
            "connect_timeout_secs" => self.connect_timeout_secs = parse_value(key, value)?,
            "login_route" => self.login_route = value.to_string(),
            "page_size" => self.page_size = parse_value(key, value)?,
            "search_debounce_ms" => self.search_debounce_ms = parse_value(key, value)?,
            "price.low" => self.price_thresholds.low = parse_value(key, value)?,
            "price.high" => self.price_thresholds.high = parse_value(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        self.validate()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::Config(format!("invalid api_url '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::Config(format!(
            "invalid api_url '{raw}': unsupported scheme '{other}'"
        ))),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ApiError::Config(format!("invalid value '{value}' for {key}")))
}

fn unknown_key(key: &str) -> ApiError {
    ApiError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert!(config.with_credentials);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.login_route, "/login");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("page_size: 20\n").unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.price_thresholds, PriceThresholds::default());
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut config = Config::default();
        config.set("api_url", "https://shop.example.com").unwrap();
        config.set("price.low", "25000").unwrap();
        config.set("with_credentials", "false").unwrap();

        assert_eq!(config.get("api_url").unwrap(), "https://shop.example.com");
        assert_eq!(config.get("price.low").unwrap(), "25000");
        assert_eq!(config.get("with_credentials").unwrap(), "false");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api_url", "ftp://example.com").is_err());
        assert!(config.set("page_size", "many").is_err());
        assert!(config.set("nope", "1").is_err());
    }

    #[test]
    fn test_set_rejects_inverted_thresholds() {
        let mut config = Config::default();
        let err = config.set("price.low", "500000").unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_set_rejects_non_finite_thresholds() {
        let mut config = Config::default();
        let err = config.set("price.low", "NaN").unwrap_err();
        assert!(err.to_string().contains("finite"));

        let mut config = Config::default();
        assert!(config.set("price.high", "inf").is_err());
        assert!(config.set("price.low", "-inf").is_err());
    }

    #[test]
    fn test_loaded_nan_threshold_fails_validation() {
        let config: Config =
            serde_yaml_ng::from_str("price_thresholds:\n  low: .nan\n  high: 100000\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_api_url() {
        let _guard = unsafe { EnvGuard::set(API_URL_ENV, "http://10.0.0.5:9000") };
        let config = Config::default();
        assert_eq!(config.api_url(), "http://10.0.0.5:9000");
        assert_eq!(config.base_url().unwrap().port(), Some(9000));
    }

    #[test]
    #[serial]
    fn test_save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let _home = unsafe { EnvGuard::set("BITEBOX_HOME", temp.path()) };

        let mut config = Config::default();
        config.set("page_size", "24").unwrap();
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.page_size, 24);
        assert!(Config::config_path().starts_with(temp.path()));
    }
}

//! Process configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Parsed once in `main` and shared read-only through `AppState`. Parsing goes
//! through a lookup closure so tests never touch the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Language;
use crate::rate_limit::{
    DEFAULT_GLOBAL_LIMIT, DEFAULT_GLOBAL_WINDOW_SECS, DEFAULT_PER_FEATURE_LIMIT, DEFAULT_PER_FEATURE_WINDOW_SECS,
    DEFAULT_TOKEN_BUDGET, DEFAULT_TOKEN_WINDOW_SECS, RateLimitConfig,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_SCAN_DURATION_MS: u64 = 1500;
pub const DEFAULT_THREAT_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_MAP_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Directory served as the browser UI; no static hosting when unset.
    pub static_dir: Option<PathBuf>,
    pub default_language: Language,
    pub scan_interval: Duration,
    pub scan_duration: Duration,
    pub threat_interval: Duration,
    pub map_tile_url: String,
    pub share_url: String,
    pub rate_limits: RateLimitConfig,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed numbers, a zero scan or
    /// threat interval, or an unknown `DEFAULT_LANGUAGE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = env_parse(&get, "PORT", DEFAULT_PORT)?;
        let default_language = match get("DEFAULT_LANGUAGE") {
            None => Language::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "DEFAULT_LANGUAGE", value: raw })?,
        };

        let rate_limits = RateLimitConfig {
            per_feature_limit: env_parse(&get, "RATE_LIMIT_PER_FEATURE", DEFAULT_PER_FEATURE_LIMIT)?,
            per_feature_window: secs(&get, "RATE_LIMIT_PER_FEATURE_WINDOW_SECS", DEFAULT_PER_FEATURE_WINDOW_SECS)?,
            global_limit: env_parse(&get, "RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT)?,
            global_window: secs(&get, "RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS)?,
            token_budget: env_parse(&get, "RATE_LIMIT_TOKEN_BUDGET", DEFAULT_TOKEN_BUDGET)?,
            token_window: secs(&get, "RATE_LIMIT_TOKEN_WINDOW_SECS", DEFAULT_TOKEN_WINDOW_SECS)?,
        };

        Ok(Self {
            port,
            static_dir: get("STATIC_DIR").filter(|v| !v.trim().is_empty()).map(PathBuf::from),
            default_language,
            scan_interval: interval(&get, "SCAN_INTERVAL_MS", DEFAULT_SCAN_INTERVAL_MS)?,
            scan_duration: millis(&get, "SCAN_DURATION_MS", DEFAULT_SCAN_DURATION_MS)?,
            threat_interval: interval(&get, "THREAT_INTERVAL_MS", DEFAULT_THREAT_INTERVAL_MS)?,
            map_tile_url: get("MAP_TILE_URL").unwrap_or_else(|| DEFAULT_MAP_TILE_URL.to_string()),
            share_url: get("SHARE_URL").unwrap_or_else(|| format!("http://localhost:{port}")),
            rate_limits,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: None,
            default_language: Language::default(),
            scan_interval: Duration::from_millis(DEFAULT_SCAN_INTERVAL_MS),
            scan_duration: Duration::from_millis(DEFAULT_SCAN_DURATION_MS),
            threat_interval: Duration::from_millis(DEFAULT_THREAT_INTERVAL_MS),
            map_tile_url: DEFAULT_MAP_TILE_URL.to_string(),
            share_url: format!("http://localhost:{DEFAULT_PORT}"),
            rate_limits: RateLimitConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn millis(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    env_parse(get, key, default).map(Duration::from_millis)
}

/// Like [`millis`], but a timer period must be non-zero.
fn interval(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let period = millis(get, key, default)?;
    if period.is_zero() {
        return Err(ConfigError::Invalid { key, value: get(key).unwrap_or_default() });
    }
    Ok(period)
}

fn secs(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    env_parse(get, key, default).map(Duration::from_secs)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

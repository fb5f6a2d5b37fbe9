//! Environment-driven configuration
//!
//! Values are read from the process environment; a `.env` file is loaded by
//! the binary before this module is consulted.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::series::MergePolicy;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_FILE: &str = "data/weekly_prices.json";
pub const DEFAULT_KRAKEN_API_URL: &str = "https://api.kraken.com";
pub const DEFAULT_LCW_API_URL: &str = "https://api.livecoinwatch.com";
pub const DEFAULT_FEAR_GREED_API_URL: &str = "https://api.alternative.me";

/// Deployment environment name (`APP_ENV`), `sandbox` when unset
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .map(|v| v.trim().to_ascii_lowercase())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

/// Upstream endpoints and credentials
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub kraken_url: String,
    pub live_coin_watch_url: String,
    pub live_coin_watch_key: Option<String>,
    pub fear_greed_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            kraken_url: DEFAULT_KRAKEN_API_URL.to_string(),
            live_coin_watch_url: DEFAULT_LCW_API_URL.to_string(),
            live_coin_watch_key: None,
            fear_greed_url: DEFAULT_FEAR_GREED_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub public_dir: Option<PathBuf>,
    /// 0 disables the background refresh
    pub refresh_interval_seconds: u64,
    pub merge_policy: MergePolicy,
    pub upstream: UpstreamConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            public_dir: None,
            refresh_interval_seconds: 0,
            merge_policy: MergePolicy::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let merge_policy = match env::var("WEEKLY_MERGE_POLICY") {
            Ok(raw) => MergePolicy::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid WEEKLY_MERGE_POLICY, using default");
                defaults.merge_policy
            }),
            Err(_) => defaults.merge_policy,
        };

        Self {
            environment: get_environment(),
            port: parse_var("PORT").unwrap_or(defaults.port),
            data_file: non_empty_var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            public_dir: non_empty_var("PUBLIC_DIR").map(PathBuf::from),
            refresh_interval_seconds: parse_var("REFRESH_INTERVAL_SECONDS")
                .unwrap_or(defaults.refresh_interval_seconds),
            merge_policy,
            upstream: UpstreamConfig {
                kraken_url: non_empty_var("KRAKEN_API_URL")
                    .unwrap_or(defaults.upstream.kraken_url),
                live_coin_watch_url: non_empty_var("LCW_API_URL")
                    .unwrap_or(defaults.upstream.live_coin_watch_url),
                live_coin_watch_key: non_empty_var("LCW_API_KEY"),
                fear_greed_url: non_empty_var("FEAR_GREED_API_URL")
                    .unwrap_or(defaults.upstream.fear_greed_url),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    non_empty_var(key).and_then(|v| v.parse().ok())
}

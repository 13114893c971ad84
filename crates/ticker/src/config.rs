//! Environment-driven configuration for the ticker binary.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use quake_core::Intensity;
use quake_feed::FeedConfig;

use crate::display::NamingMode;

/// Runtime configuration, read once at startup.
///
/// Every knob has a default so the binary starts with no environment at
/// all; unparsable values fall back to the default rather than aborting.
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// Address the HTTP server binds, `NAMAZU_ADDR`.
    pub bind_addr: String,
    /// Upstream fetch configuration, `NAMAZU_API_BASE` /
    /// `NAMAZU_PLACENAME_URL` / `NAMAZU_FETCH_LIMIT` /
    /// `NAMAZU_FETCH_TIMEOUT_SECS`.
    pub feed: FeedConfig,
    /// Seconds between polls, `NAMAZU_POLL_SECS`.
    pub poll_interval: Duration,
    /// Minimum listed intensity as an upstream code, `NAMAZU_MIN_SCALE`.
    pub min_scale: Intensity,
    /// Override-table file, `NAMAZU_OVERRIDES`.
    pub override_path: PathBuf,
    /// Ticker surface width in character cells, `NAMAZU_COLUMNS`.
    pub columns: usize,
    /// Seconds each page stays up during playback, `NAMAZU_PAGE_SECS`.
    pub page_interval: Duration,
    /// Point naming mode, `NAMAZU_NAMING` ("municipality" or "station").
    pub naming: NamingMode,
    /// Simulation mode: pick a random early warning instead of the most
    /// recent one, `NAMAZU_SIMULATE`.
    pub simulate: bool,
}

impl TickerConfig {
    pub fn from_env() -> Self {
        let mut feed = FeedConfig::new(
            env_or_else("NAMAZU_API_BASE", || "https://api.p2pquake.net/v2".to_string()),
            env_or_else("NAMAZU_PLACENAME_URL", || {
                "http://localhost:8900/admin-names.json".to_string()
            }),
        );
        feed.limit = env_or("NAMAZU_FETCH_LIMIT", feed.limit);
        feed.timeout = Duration::from_secs(env_or("NAMAZU_FETCH_TIMEOUT_SECS", 5));

        Self {
            bind_addr: env_or_else("NAMAZU_ADDR", || "127.0.0.1:8753".to_string()),
            feed,
            poll_interval: Duration::from_secs(env_or("NAMAZU_POLL_SECS", 60)),
            min_scale: env::var("NAMAZU_MIN_SCALE")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .and_then(Intensity::from_code)
                .unwrap_or(aggregator::DEFAULT_MIN_SCALE),
            override_path: PathBuf::from(env_or_else("NAMAZU_OVERRIDES", || {
                "data/overrides.json".to_string()
            })),
            columns: env_or("NAMAZU_COLUMNS", 24),
            page_interval: Duration::from_secs(env_or("NAMAZU_PAGE_SECS", 5)),
            naming: match env::var("NAMAZU_NAMING").as_deref() {
                Ok("station") => NamingMode::ByStation,
                _ => NamingMode::ByMunicipality,
            },
            simulate: env::var("NAMAZU_SIMULATE").is_ok(),
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8753".to_string(),
            feed: FeedConfig::default(),
            poll_interval: Duration::from_secs(60),
            min_scale: aggregator::DEFAULT_MIN_SCALE,
            override_path: PathBuf::from("data/overrides.json"),
            columns: 24,
            page_interval: Duration::from_secs(5),
            naming: NamingMode::ByMunicipality,
            simulate: false,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_or_else(key: &str, default: impl FnOnce() -> String) -> String {
    env::var(key).unwrap_or_else(|_| default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = TickerConfig::default();
        assert_eq!(config.min_scale, Intensity::Int3);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.naming, NamingMode::ByMunicipality);
        assert!(!config.simulate);
    }
}

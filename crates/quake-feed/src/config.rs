//! Configuration types for quake-feed.

use std::time::Duration;

use quake_core::ReportKind;

/// Default per-request timeout. The upstream API is a third-party service;
/// a hung fetch degrades to a missing report kind rather than stalling the
/// poll.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of records requested per report kind.
pub const DEFAULT_LIMIT: usize = 20;

/// Configuration for the upstream fetches.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the earthquake API (e.g. "https://api.p2pquake.net/v2").
    pub base_url: String,
    /// URL of the administrative place-name dataset.
    pub placename_url: String,
    /// Records per report kind.
    pub limit: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn new(base_url: impl Into<String>, placename_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placename_url: placename_url.into(),
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// History endpoint for one report kind.
    pub fn history_url(&self, kind: ReportKind) -> String {
        format!(
            "{}/history?codes={}&limit={}",
            self.base_url,
            kind.code(),
            self.limit
        )
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(
            "https://api.p2pquake.net/v2",
            "http://localhost:8900/admin-names.json",
        )
    }
}

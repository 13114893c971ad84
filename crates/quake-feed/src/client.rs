//! HTTP client for the upstream earthquake API.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use quake_core::{
    parse_reports, NameTiers, NamedPlace, PlaceNameSource, RawReport, ReportKind,
    ReportSource, SourceError,
};

use crate::config::FeedConfig;
use crate::error::FeedError;

/// Client for the earthquake report history and the place-name dataset.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Build a client with the configured timeout.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = Client::builder()
            .user_agent(concat!("namazu/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    async fn get_json(&self, url: &str) -> Result<Value, FeedError> {
        debug!(url, "fetching");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReportSource for FeedClient {
    async fn fetch(&self, kind: ReportKind) -> Result<Vec<RawReport>, SourceError> {
        let url = self.config.history_url(kind);
        let value = self.get_json(&url).await.map_err(SourceError::from)?;

        // The endpoint returns one JSON array; individual records that do
        // not match their code are dropped by the parser, not fatal.
        let values: Vec<Value> = serde_json::from_value(value)?;
        let reports = parse_reports(&values);
        debug!(kind = ?kind, count = reports.len(), "fetched reports");
        Ok(reports)
    }
}

#[async_trait]
impl PlaceNameSource for FeedClient {
    async fn fetch_administrative_names(&self) -> Result<NameTiers, SourceError> {
        let value = self
            .get_json(&self.config.placename_url)
            .await
            .map_err(SourceError::from)?;

        let wire: WireTiers = serde_json::from_value(value)?;
        Ok(flatten_tiers(wire))
    }
}

// Dataset wire shape: three maps of record id → {name, kana}.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTiers {
    prefectures: HashMap<String, WireName>,
    cities: HashMap<String, WireName>,
    wards: HashMap<String, WireName>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireName {
    name: String,
    kana: String,
}

/// Flatten one tier map into id-sorted places, so dictionary construction
/// is deterministic across fetches.
fn flatten_tier(tier: HashMap<String, WireName>) -> Vec<NamedPlace> {
    let mut entries: Vec<(String, WireName)> = tier.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
        .into_iter()
        .map(|(_, wire)| NamedPlace {
            name: wire.name,
            reading: wire.kana,
        })
        .collect()
}

fn flatten_tiers(wire: WireTiers) -> NameTiers {
    NameTiers {
        prefectures: flatten_tier(wire.prefectures),
        cities: flatten_tier(wire.cities),
        wards: flatten_tier(wire.wards),
    }
}

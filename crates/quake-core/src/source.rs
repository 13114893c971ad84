//! Traits for the external collaborators the core depends on.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::report::{EarlyWarningReport, RawReport};
use crate::scale::ReportKind;

/// A named administrative place with its phonetic reading.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPlace {
    pub name: String,
    /// Reading as delivered by the dataset (katakana).
    pub reading: String,
}

/// The three administrative tiers of the reference dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTiers {
    pub prefectures: Vec<NamedPlace>,
    pub cities: Vec<NamedPlace>,
    pub wards: Vec<NamedPlace>,
}

impl NameTiers {
    /// All places across the three tiers, prefecture tier first.
    pub fn iter(&self) -> impl Iterator<Item = &NamedPlace> {
        self.prefectures
            .iter()
            .chain(self.cities.iter())
            .chain(self.wards.iter())
    }
}

/// Source of upstream earthquake reports, one fetch per kind.
///
/// Each call is independent and may fail independently; the aggregator
/// tolerates any subset of the four kinds being absent.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, kind: ReportKind) -> Result<Vec<RawReport>, SourceError>;
}

/// Source of the administrative place-name reference dataset, fetched once
/// at startup. A failure leaves the dictionary empty (readings degrade to
/// blank), never fatal.
#[async_trait]
pub trait PlaceNameSource: Send + Sync {
    async fn fetch_administrative_names(&self) -> Result<NameTiers, SourceError>;
}

/// Persisted store for user-entered reading overrides.
///
/// The mapping is small and user-curated; reads and writes are synchronous.
/// Implementations must treat a corrupted store as empty rather than erroring
/// on ambient load.
pub trait OverrideStore: Send + Sync {
    fn load(&self) -> Result<HashMap<String, String>, SourceError>;
    fn save(&self, overrides: &HashMap<String, String>) -> Result<(), SourceError>;
}

/// Fire-and-forget delivery of early-warning alerts to the UI layer.
///
/// Delivery must be idempotent per correlation id while an alert for that
/// id is active; callers gate duplicates before invoking the sink.
pub trait AlertSink: Send + Sync {
    fn notify(&self, warning: &EarlyWarningReport);
}

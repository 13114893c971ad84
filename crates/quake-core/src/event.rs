//! The canonical deduplicated earthquake record.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::report::{ObservationPoint, Station};
use crate::scale::{Intensity, TsunamiGrade, TsunamiStatus};

/// Merged view of the tsunami forecasts sharing one correlation id.
///
/// Area names are deduplicated per grade, preserving first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TsunamiForecast {
    pub major_warning: Vec<String>,
    pub warning: Vec<String>,
    pub advisory: Vec<String>,
    /// Highest grade with at least one area, if any.
    pub highest: Option<TsunamiGrade>,
}

impl TsunamiForecast {
    /// Area list for one grade.
    pub fn areas(&self, grade: TsunamiGrade) -> &[String] {
        match grade {
            TsunamiGrade::MajorWarning => &self.major_warning,
            TsunamiGrade::Warning => &self.warning,
            TsunamiGrade::Advisory => &self.advisory,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.major_warning.is_empty() && self.warning.is_empty() && self.advisory.is_empty()
    }
}

/// Merged view of the tsunami observations sharing one correlation id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TsunamiObservation {
    /// Maximum observed height across all stations, in meters.
    pub max_height: Option<f64>,
    /// Flattened station list across all areas, in report order.
    pub stations: Vec<Station>,
}

/// A deduplicated earthquake event, rebuilt fresh on every poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Content-derived stable identifier; see [`event_id`].
    pub id: String,
    /// Upstream transient id, kept only so tsunami context can be joined.
    pub correlation_id: String,
    pub time: String,
    pub epicenter: String,
    pub depth: Option<f64>,
    pub magnitude: Option<f64>,
    pub max_scale: Option<Intensity>,
    pub tsunami: TsunamiStatus,
    pub forecast: Option<TsunamiForecast>,
    pub observation: Option<TsunamiObservation>,
    pub points: Vec<ObservationPoint>,
}

/// Compute the stable event identifier.
///
/// A SHA-256 fingerprint of `"{time}_{epicenter}"`, so the same physical
/// earthquake hashes to the same id on every poll. The upstream event id is
/// deliberately not used here: it is reused inconsistently across
/// correction revisions, and only serves to correlate tsunami reports.
pub fn event_id(time: &str, epicenter: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(time.as_bytes());
    hasher.update(b"_");
    hasher.update(epicenter.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_stable() {
        let first = event_id("2011-03-11T14:46:00+09:00", "三陸沖");
        let second = event_id("2011-03-11T14:46:00+09:00", "三陸沖");
        let different = event_id("2011-03-11T14:47:00+09:00", "三陸沖");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_event_id_distinguishes_epicenter() {
        let a = event_id("2024-01-01T16:10:00+09:00", "能登半島沖");
        let b = event_id("2024-01-01T16:10:00+09:00", "石川県能登地方");
        assert_ne!(a, b);
    }

    #[test]
    fn test_forecast_accessors() {
        let forecast = TsunamiForecast {
            warning: vec!["宮城県".to_string()],
            highest: Some(TsunamiGrade::Warning),
            ..Default::default()
        };
        assert!(!forecast.is_empty());
        assert_eq!(forecast.areas(TsunamiGrade::Warning).len(), 1);
        assert!(forecast.areas(TsunamiGrade::MajorWarning).is_empty());
    }
}

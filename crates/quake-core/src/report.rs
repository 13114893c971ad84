//! Upstream report types and defensive JSON decoding.
//!
//! The upstream API returns one JSON array mixing all report kinds,
//! discriminated by a numeric `code` field. The schema is a third-party
//! contract outside this system's control, so every field is decoded
//! tolerantly: missing or null fields fall back to defaults, sentinel
//! values (`-1` for depth/magnitude/scale) become `None`, and a record
//! whose shape does not match its code is skipped rather than failing the
//! poll.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::scale::{Intensity, ReportKind, TsunamiStatus};
use crate::TsunamiGrade;

/// A single observation point from an intensity report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ObservationPoint {
    /// Prefecture name, e.g. "宮城県".
    pub prefecture: String,
    /// Raw observation address, e.g. "仙台市宮城野区".
    pub address: String,
    /// Observed intensity at this point, if reported.
    pub scale: Option<Intensity>,
    /// Whether this record describes an area rather than a station.
    pub is_area: bool,
}

/// Seismic-intensity report (code 551).
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityReport {
    /// Upstream transient id, used only to join tsunami reports.
    pub correlation_id: String,
    /// Event time string, part of the merge key.
    pub time: String,
    /// Epicenter name, part of the merge key. `None` when unreported.
    pub epicenter: Option<String>,
    /// Depth in km.
    pub depth: Option<f64>,
    pub magnitude: Option<f64>,
    pub max_scale: Option<Intensity>,
    pub tsunami: TsunamiStatus,
    pub points: Vec<ObservationPoint>,
}

/// One coastal area of a tsunami forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastArea {
    pub grade: Option<TsunamiGrade>,
    pub name: String,
}

/// Tsunami-forecast report (code 552).
#[derive(Debug, Clone, PartialEq)]
pub struct TsunamiForecastReport {
    pub correlation_id: String,
    pub areas: Vec<ForecastArea>,
}

/// A tide station observation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Station {
    pub name: String,
    pub time: Option<String>,
    /// Observed wave height in meters.
    pub height: Option<f64>,
}

/// One area of a tsunami-observation report.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationArea {
    pub name: String,
    pub stations: Vec<Station>,
}

/// Tsunami-observation report (code 556).
#[derive(Debug, Clone, PartialEq)]
pub struct TsunamiObservationReport {
    pub correlation_id: String,
    pub cancelled: bool,
    pub areas: Vec<ObservationArea>,
}

/// Early-warning report (code 554).
#[derive(Debug, Clone, PartialEq)]
pub struct EarlyWarningReport {
    pub correlation_id: String,
    pub time: Option<String>,
    pub hypocenter: Option<String>,
    pub max_scale: Option<Intensity>,
    pub magnitude: Option<f64>,
    pub tsunami: TsunamiStatus,
}

/// One upstream report of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReport {
    Intensity(IntensityReport),
    TsunamiForecast(TsunamiForecastReport),
    TsunamiObservation(TsunamiObservationReport),
    EarlyWarning(EarlyWarningReport),
}

impl RawReport {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Intensity(_) => ReportKind::Intensity,
            Self::TsunamiForecast(_) => ReportKind::TsunamiForecast,
            Self::TsunamiObservation(_) => ReportKind::TsunamiObservation,
            Self::EarlyWarning(_) => ReportKind::EarlyWarning,
        }
    }
}

// Wire-level shapes. All fields default so partially filled records decode.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireHypocenter {
    name: String,
    depth: Option<f64>,
    magnitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireEarthquake {
    time: String,
    hypocenter: WireHypocenter,
    max_scale: Option<i64>,
    domestic_tsunami: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WirePoint {
    pref: String,
    addr: String,
    scale: Option<i64>,
    is_area: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireQuake {
    id: String,
    earthquake: WireEarthquake,
    points: Vec<WirePoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireForecastArea {
    grade: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireForecast {
    id: String,
    areas: Vec<WireForecastArea>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireStation {
    name: String,
    time: String,
    height: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireObservationArea {
    name: String,
    stations: Vec<WireStation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireObservation {
    id: String,
    cancelled: bool,
    areas: Vec<WireObservationArea>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireWarning {
    id: String,
    time: String,
    earthquake: WireEarthquake,
}

/// Map the upstream `-1` "no data" sentinel to `None`.
fn sentinel(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v >= 0.0)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Decode one upstream record. Returns `None` (with a debug log) for
/// unknown codes or records whose shape does not match their code.
pub fn parse_report(value: &Value) -> Option<RawReport> {
    let code = value.get("code").and_then(Value::as_i64)?;
    let Some(kind) = ReportKind::from_code(code) else {
        debug!(code, "skipping report with unknown code");
        return None;
    };

    let parsed = match kind {
        ReportKind::Intensity => {
            serde_json::from_value::<WireQuake>(value.clone())
                .ok()
                .map(|wire| {
                    RawReport::Intensity(IntensityReport {
                        correlation_id: wire.id,
                        time: wire.earthquake.time,
                        epicenter: non_empty(wire.earthquake.hypocenter.name),
                        depth: sentinel(wire.earthquake.hypocenter.depth),
                        magnitude: sentinel(wire.earthquake.hypocenter.magnitude),
                        max_scale: wire
                            .earthquake
                            .max_scale
                            .and_then(Intensity::from_code),
                        tsunami: TsunamiStatus::from_upstream(
                            &wire.earthquake.domestic_tsunami,
                        ),
                        points: wire
                            .points
                            .into_iter()
                            .map(|p| ObservationPoint {
                                prefecture: p.pref,
                                address: p.addr,
                                scale: p.scale.and_then(Intensity::from_code),
                                is_area: p.is_area,
                            })
                            .collect(),
                    })
                })
        }
        ReportKind::TsunamiForecast => {
            serde_json::from_value::<WireForecast>(value.clone())
                .ok()
                .map(|wire| {
                    RawReport::TsunamiForecast(TsunamiForecastReport {
                        correlation_id: wire.id,
                        areas: wire
                            .areas
                            .into_iter()
                            .map(|a| ForecastArea {
                                grade: TsunamiGrade::from_upstream(&a.grade),
                                name: a.name,
                            })
                            .collect(),
                    })
                })
        }
        ReportKind::TsunamiObservation => {
            serde_json::from_value::<WireObservation>(value.clone())
                .ok()
                .map(|wire| {
                    RawReport::TsunamiObservation(TsunamiObservationReport {
                        correlation_id: wire.id,
                        cancelled: wire.cancelled,
                        areas: wire
                            .areas
                            .into_iter()
                            .map(|a| ObservationArea {
                                name: a.name,
                                stations: a
                                    .stations
                                    .into_iter()
                                    .map(|s| Station {
                                        name: s.name,
                                        time: non_empty(s.time),
                                        height: sentinel(s.height),
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                })
        }
        ReportKind::EarlyWarning => {
            serde_json::from_value::<WireWarning>(value.clone())
                .ok()
                .map(|wire| {
                    let time = if wire.earthquake.time.is_empty() {
                        wire.time
                    } else {
                        wire.earthquake.time
                    };
                    RawReport::EarlyWarning(EarlyWarningReport {
                        correlation_id: wire.id,
                        time: non_empty(time),
                        hypocenter: non_empty(wire.earthquake.hypocenter.name),
                        max_scale: wire
                            .earthquake
                            .max_scale
                            .and_then(Intensity::from_code),
                        magnitude: sentinel(wire.earthquake.hypocenter.magnitude),
                        tsunami: TsunamiStatus::from_upstream(
                            &wire.earthquake.domestic_tsunami,
                        ),
                    })
                })
        }
    };

    if parsed.is_none() {
        debug!(code, "skipping report with mismatched shape");
    }
    parsed
}

/// Decode an upstream array, silently dropping malformed records.
pub fn parse_reports(values: &[Value]) -> Vec<RawReport> {
    values.iter().filter_map(parse_report).collect()
}

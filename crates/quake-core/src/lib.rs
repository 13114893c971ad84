//! Core types and collaborator traits for the Namazu earthquake ticker.
//!
//! This crate provides the shared surface the rest of the workspace builds
//! on. It defines:
//!
//! - [`Intensity`] / [`TsunamiStatus`] / [`TsunamiGrade`] - the fixed
//!   enumerations of the upstream contract
//! - [`RawReport`] and its four kinds, parsed defensively from upstream JSON
//! - [`Event`] - the canonical deduplicated earthquake record, with its
//!   content-derived stable id
//! - [`ReportSource`] / [`PlaceNameSource`] / [`OverrideStore`] /
//!   [`AlertSink`] - traits for the external collaborators
//! - [`SourceError`] - error type for collaborator operations
//!
//! # Example
//!
//! ```rust
//! use quake_core::{event_id, Intensity};
//!
//! let id = event_id("2011-03-11T14:46:00+09:00", "三陸沖");
//! assert_eq!(id.len(), 64);
//! assert!(Intensity::from_code(45) > Intensity::from_code(40));
//! ```

mod error;
mod event;
mod report;
mod scale;
mod source;

pub use error::SourceError;
pub use event::{event_id, Event, TsunamiForecast, TsunamiObservation};
pub use report::{
    parse_report, parse_reports, EarlyWarningReport, ForecastArea, IntensityReport,
    ObservationArea, ObservationPoint, RawReport, Station, TsunamiForecastReport,
    TsunamiObservationReport,
};
pub use scale::{Intensity, ReportKind, TsunamiGrade, TsunamiStatus};
pub use source::{
    AlertSink, NameTiers, NamedPlace, OverrideStore, PlaceNameSource, ReportSource,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

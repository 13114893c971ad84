//! Fixed enumerations of the upstream report contract.

use serde::{Deserialize, Serialize};

/// A step of the JMA seismic intensity scale.
///
/// Upstream reports carry these as numeric codes (10, 20, ... 70). Levels 5
/// and 6 split into weak ("lower") and strong ("upper") sub-grades, which is
/// why the codes are not evenly spaced. Ordering follows the scale itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Intensity {
    Int1,
    Int2,
    Int3,
    Int4,
    Int5Lower,
    Int5Upper,
    Int6Lower,
    Int6Upper,
    Int7,
}

impl Intensity {
    /// Decode an upstream intensity code. Unknown codes (including the
    /// `-1` "no data" sentinel) decode to `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            10 => Some(Self::Int1),
            20 => Some(Self::Int2),
            30 => Some(Self::Int3),
            40 => Some(Self::Int4),
            45 => Some(Self::Int5Lower),
            50 => Some(Self::Int5Upper),
            55 => Some(Self::Int6Lower),
            60 => Some(Self::Int6Upper),
            70 => Some(Self::Int7),
            _ => None,
        }
    }

    /// The upstream numeric code for this step.
    pub fn code(&self) -> i64 {
        match self {
            Self::Int1 => 10,
            Self::Int2 => 20,
            Self::Int3 => 30,
            Self::Int4 => 40,
            Self::Int5Lower => 45,
            Self::Int5Upper => 50,
            Self::Int6Lower => 55,
            Self::Int6Upper => 60,
            Self::Int7 => 70,
        }
    }

    /// Display label, e.g. "震度5弱".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Int1 => "震度1",
            Self::Int2 => "震度2",
            Self::Int3 => "震度3",
            Self::Int4 => "震度4",
            Self::Int5Lower => "震度5弱",
            Self::Int5Upper => "震度5強",
            Self::Int6Lower => "震度6弱",
            Self::Int6Upper => "震度6強",
            Self::Int7 => "震度7",
        }
    }
}

/// Domestic tsunami status attached to an intensity or early-warning report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TsunamiStatus {
    None,
    Checking,
    Warning,
    MajorWarning,
    Unknown,
}

impl TsunamiStatus {
    /// Decode the upstream status string. Anything unrecognized maps to
    /// `Unknown` rather than failing the record.
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "None" => Self::None,
            "Checking" => Self::Checking,
            "Warning" => Self::Warning,
            "MajorWarning" => Self::MajorWarning,
            _ => Self::Unknown,
        }
    }
}

impl Default for TsunamiStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Severity grade of a coastal-area tsunami forecast, ordered ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TsunamiGrade {
    Advisory,
    Warning,
    MajorWarning,
}

impl TsunamiGrade {
    /// Decode the upstream grade string. The upstream feed has used both
    /// "Watch" and "Advisory" for the lowest grade.
    pub fn from_upstream(value: &str) -> Option<Self> {
        match value {
            "Advisory" | "Watch" => Some(Self::Advisory),
            "Warning" => Some(Self::Warning),
            "MajorWarning" => Some(Self::MajorWarning),
            _ => None,
        }
    }
}

/// The four report kinds, discriminated upstream by a numeric `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Seismic-intensity report (code 551).
    Intensity,
    /// Tsunami-forecast report (code 552).
    TsunamiForecast,
    /// Early-warning report (code 554).
    EarlyWarning,
    /// Tsunami-observation report (code 556).
    TsunamiObservation,
}

impl ReportKind {
    /// All kinds, in the order one poll fetches them.
    pub const ALL: [ReportKind; 4] = [
        Self::Intensity,
        Self::TsunamiForecast,
        Self::EarlyWarning,
        Self::TsunamiObservation,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            551 => Some(Self::Intensity),
            552 => Some(Self::TsunamiForecast),
            554 => Some(Self::EarlyWarning),
            556 => Some(Self::TsunamiObservation),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Intensity => 551,
            Self::TsunamiForecast => 552,
            Self::EarlyWarning => 554,
            Self::TsunamiObservation => 556,
        }
    }
}

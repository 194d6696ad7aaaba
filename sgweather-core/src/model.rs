//! Shared domain models for the real-time weather APIs.
//!
//! These mirror the JSON shape served by the data.gov.sg v2 real-time
//! endpoints; only the fields the service consumes are kept.

use serde::Deserialize;

/// The three real-time metrics the service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rainfall,
    WindSpeed,
    WindDirection,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Rainfall => "rainfall",
            Metric::WindSpeed => "wind speed",
            Metric::WindDirection => "wind direction",
        }
    }

    /// Measurement unit as displayed to users.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Rainfall => "mm",
            Metric::WindSpeed => "knots",
            Metric::WindDirection => "°",
        }
    }

    /// Path of the metric's endpoint, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Metric::Rainfall => "/rainfall",
            Metric::WindSpeed => "/wind-speed",
            Metric::WindDirection => "/wind-direction",
        }
    }

    pub const fn all() -> &'static [Metric] {
        &[Metric::Rainfall, Metric::WindSpeed, Metric::WindDirection]
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed physical weather-sensing location with a stable code.
#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// One measurement for one station. A `null` value means the station
/// reported no data, which is distinct from the station being absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub station_id: String,
    pub value: Option<f64>,
}

/// A timestamped set of station measurements for one metric.
///
/// Sources deliver readings newest-first; only the first element is
/// ever consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    pub data: Vec<DataPoint>,
}

/// Top-level response envelope. `code == 0` signals success; any other
/// code means the source is unusable even though transport succeeded.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePayload {
    pub code: i64,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub data: Option<SourceData>,
}

/// The usable part of a source payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceData {
    pub stations: Vec<Station>,
    pub readings: Vec<Reading>,
}

/// Derived statistics over the freshest reading of one source.
///
/// `count` is the number of stations that reported a non-absent value;
/// the all-zero record is the deliberate "empty but not erroring"
/// result for sources with no usable values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

/// Result of one coordinated fetch across all three sources.
///
/// Every slot is populated independently: a failed source is `None`
/// and never blocks or invalidates the others.
#[derive(Debug, Clone, Default)]
pub struct WeatherSnapshot {
    pub rainfall: Option<SourceData>,
    pub wind_speed: Option<SourceData>,
    pub wind_direction: Option<SourceData>,
}

impl WeatherSnapshot {
    pub fn get(&self, metric: Metric) -> Option<&SourceData> {
        match metric {
            Metric::Rainfall => self.rainfall.as_ref(),
            Metric::WindSpeed => self.wind_speed.as_ref(),
            Metric::WindDirection => self.wind_direction.as_ref(),
        }
    }

    /// True when every source came back absent.
    pub fn is_empty(&self) -> bool {
        Metric::all().iter().all(|m| self.get(*m).is_none())
    }
}

//! Extraction and aggregation over source readings.
//!
//! Sources deliver readings newest-first and only the freshest one is
//! ever consulted; no history is retained.

use crate::model::{DataPoint, Reading, SummaryStats};

/// Data points of the freshest reading, or an empty slice when the
/// source delivered no readings at all.
pub fn latest_data_points(readings: &[Reading]) -> &[DataPoint] {
    readings.first().map(|r| r.data.as_slice()).unwrap_or(&[])
}

/// Timestamp of the freshest reading.
pub fn latest_timestamp(readings: &[Reading]) -> Option<&str> {
    readings.first().map(|r| r.timestamp.as_str())
}

/// Value reported by one station in the freshest reading.
///
/// `None` covers both "station has no entry" and "station reported no
/// data"; a zero reading is a real value and comes back as `Some(0.0)`.
pub fn latest_value(readings: &[Reading], station_id: &str) -> Option<f64> {
    latest_data_points(readings)
        .iter()
        .find(|p| p.station_id == station_id)
        .and_then(|p| p.value)
}

/// Min/max/average/count over the non-absent values of the freshest
/// reading.
///
/// An empty or fully-absent reading yields the all-zero record with
/// count 0 — deliberately not an error, so callers can render "no
/// data" without a failure path.
pub fn summary_stats(readings: &[Reading]) -> SummaryStats {
    let values: Vec<f64> = latest_data_points(readings)
        .iter()
        .filter_map(|p| p.value)
        .collect();

    if values.is_empty() {
        return SummaryStats::default();
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SummaryStats {
        min,
        max,
        avg: sum / values.len() as f64,
        count: values.len(),
    }
}

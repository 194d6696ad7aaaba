//! Plain-text report builders.
//!
//! Pure functions from fetched data to user-facing text; the command
//! layer only prints what comes out of here. A failed lookup renders a
//! distinct "not found" message, a failed source renders a "try again
//! later" message — never an error.

use std::collections::BTreeMap;

use sgweather_core::classify::{rainfall_intensity, wind_direction_text, wind_speed_category};
use sgweather_core::format::format_timestamp;
use sgweather_core::model::{Metric, Reading, SourceData, WeatherSnapshot};
use sgweather_core::readings::{latest_data_points, latest_timestamp, latest_value, summary_stats};
use sgweather_core::stations::{self, merge_stations};

/// Chat-platform message length limit.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

const TOTAL_FAILURE: &str = "Unable to fetch weather data. Please try again later.";

/// Failure line for a single absent source.
pub fn source_unavailable(metric: Metric) -> String {
    format!("Unable to fetch {metric} data. Please try again later.")
}

fn heading(metric: Metric) -> &'static str {
    match metric {
        Metric::Rainfall => "Rainfall",
        Metric::WindSpeed => "Wind Speed",
        Metric::WindDirection => "Wind Direction",
    }
}

fn station_not_found(query: &str) -> String {
    format!(
        "Station not found: '{query}'.\n\
         Use the stations command to see available stations, or try a \
         station id (e.g. S108), a station name (e.g. marina), a partial \
         name, or 'all' for every station."
    )
}

fn section_header(title: &str, readings: &[Reading]) -> String {
    match latest_timestamp(readings) {
        Some(ts) => format!("{title} (as of {})", format_timestamp(ts)),
        None => title.to_string(),
    }
}

/// Overview across all three sources; renders whatever is available
/// and a generic failure line only when every source is absent.
pub fn weather_overview(snapshot: &WeatherSnapshot) -> String {
    if snapshot.is_empty() {
        return TOTAL_FAILURE.to_string();
    }

    let mut out = vec!["Singapore Weather Overview".to_string(), String::new()];

    if let Some(rainfall) = &snapshot.rainfall {
        let stats = summary_stats(&rainfall.readings);
        out.push(section_header("Rainfall", &rainfall.readings));
        out.push(format!("  Average: {:.1} mm", stats.avg));
        out.push(format!("  Range: {:.1} - {:.1} mm", stats.min, stats.max));
        out.push(format!("  Active stations: {}", stats.count));
        if let Some((name, value)) = highest_rainfall(rainfall) {
            out.push(format!("  Highest: {value:.1} mm at {name}"));
        }
        out.push(String::new());
    }

    if let Some(speed) = &snapshot.wind_speed {
        let stats = summary_stats(&speed.readings);
        out.push(section_header("Wind Speed", &speed.readings));
        out.push(format!("  Average: {:.1} knots", stats.avg));
        out.push(format!("  Range: {:.1} - {:.1} knots", stats.min, stats.max));
        out.push(format!("  Active stations: {}", stats.count));
        out.push(String::new());
    }

    if let Some(direction) = &snapshot.wind_direction {
        out.push(section_header("Wind Direction", &direction.readings));
        out.push(format!(
            "  Data available from {} stations",
            direction.stations.len()
        ));
        out.push(String::new());
    }

    out.push(
        "Use the rainfall, wind-speed or wind-direction commands with a \
         station name for specific data."
            .to_string(),
    );
    out.join("\n")
}

fn highest_rainfall(data: &SourceData) -> Option<(String, f64)> {
    latest_data_points(&data.readings)
        .iter()
        .filter_map(|p| p.value.map(|v| (p, v)))
        .filter(|(_, v)| *v > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .and_then(|(p, v)| {
            stations::find_by_id(&data.stations, &p.station_id).map(|s| (s.name.clone(), v))
        })
}

/// Report for one metric: overall summary, a specific station, or the
/// full per-station listing for the query "all".
pub fn metric_report(metric: Metric, data: &SourceData, query: Option<&str>) -> String {
    match query {
        Some(q) if q.eq_ignore_ascii_case("all") => all_stations_report(metric, data),
        Some(q) => station_report(metric, data, q),
        None => summary_report(metric, data),
    }
}

fn classification_line(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Rainfall => rainfall_intensity(value).to_string(),
        Metric::WindSpeed => wind_speed_category(value).to_string(),
        Metric::WindDirection => wind_direction_text(Some(value)),
    }
}

fn station_report(metric: Metric, data: &SourceData, query: &str) -> String {
    let Some(station) = stations::resolve(&data.stations, query) else {
        return station_not_found(query);
    };

    let value = latest_value(&data.readings, &station.id);

    let mut out = vec![
        format!("{} Data", heading(metric)),
        String::new(),
        format!("Station: {} ({})", station.name, station.id),
    ];
    if let Some(ts) = latest_timestamp(&data.readings) {
        out.push(format!("Time: {}", format_timestamp(ts)));
    }

    match (metric, value) {
        (Metric::WindDirection, Some(v)) => {
            out.push(format!(
                "Wind Direction: {v:.0}° ({})",
                wind_direction_text(Some(v))
            ));
        }
        (m, Some(v)) => {
            out.push(format!("{}: {v:.1} {}", heading(m), m.unit()));
            out.push(String::new());
            out.push(classification_line(m, v));
        }
        (m, None) => out.push(format!("{}: no data", heading(m))),
    }

    out.join("\n")
}

fn all_stations_report(metric: Metric, data: &SourceData) -> String {
    let mut rows: Vec<(String, String, Option<f64>)> = latest_data_points(&data.readings)
        .iter()
        .filter_map(|p| {
            stations::find_by_id(&data.stations, &p.station_id)
                .map(|s| (s.name.clone(), s.id.clone(), p.value))
        })
        .collect();

    // direction listings read best alphabetically; scalar metrics are
    // sorted by value, highest first
    match metric {
        Metric::WindDirection => rows.sort_by(|a, b| a.0.cmp(&b.0)),
        _ => rows.sort_by(|a, b| b.2.unwrap_or(0.0).total_cmp(&a.2.unwrap_or(0.0))),
    }

    let mut out = vec![format!("All {} Stations", heading(metric)), String::new()];
    if let Some(ts) = latest_timestamp(&data.readings) {
        out.push(format!("Time: {}", format_timestamp(ts)));
        out.push(String::new());
    }

    for (name, id, value) in rows {
        out.push(match value {
            Some(v) if metric == Metric::WindDirection => {
                format!("{name} ({id}): {v:.0}° ({})", wind_direction_text(Some(v)))
            }
            Some(v) => format!("{name} ({id}): {v:.1} {}", metric.unit()),
            None => format!("{name} ({id}): no data"),
        });
    }

    out.join("\n")
}

fn summary_report(metric: Metric, data: &SourceData) -> String {
    match metric {
        Metric::WindDirection => direction_summary(data),
        _ => scalar_summary(metric, data),
    }
}

fn scalar_summary(metric: Metric, data: &SourceData) -> String {
    let stats = summary_stats(&data.readings);
    let unit = metric.unit();

    let mut out = vec![format!("{} Summary", heading(metric)), String::new()];
    if let Some(ts) = latest_timestamp(&data.readings) {
        out.push(format!("Time: {}", format_timestamp(ts)));
    }
    out.push("Statistics:".to_string());
    out.push(format!("  Average: {:.1} {unit}", stats.avg));
    out.push(format!("  Minimum: {:.1} {unit}", stats.min));
    out.push(format!("  Maximum: {:.1} {unit}", stats.max));
    out.push(format!("  Active stations: {}", stats.count));

    let mut top: Vec<(String, f64)> = latest_data_points(&data.readings)
        .iter()
        .filter_map(|p| p.value.map(|v| (p.station_id.clone(), v)))
        .filter(|(_, v)| metric != Metric::Rainfall || *v > 0.0)
        .filter_map(|(id, v)| {
            stations::find_by_id(&data.stations, &id).map(|s| (s.name.clone(), v))
        })
        .collect();

    if top.is_empty() {
        if metric == Metric::Rainfall {
            out.push(String::new());
            out.push("No rainfall detected across all stations".to_string());
        }
    } else {
        top.sort_by(|a, b| b.1.total_cmp(&a.1));
        out.push(String::new());
        out.push(match metric {
            Metric::Rainfall => "Top Rainfall Locations:".to_string(),
            _ => "Highest Wind Speed Locations:".to_string(),
        });
        for (i, (name, value)) in top.iter().take(3).enumerate() {
            out.push(format!("{}. {name}: {value:.1} {unit}", i + 1));
        }
    }

    out.join("\n")
}

fn direction_summary(data: &SourceData) -> String {
    let mut out = vec!["Wind Direction Summary".to_string(), String::new()];
    if let Some(ts) = latest_timestamp(&data.readings) {
        out.push(format!("Time: {}", format_timestamp(ts)));
    }
    out.push(format!("Available from {} stations", data.stations.len()));

    let mut rows: Vec<(String, f64)> = latest_data_points(&data.readings)
        .iter()
        .filter_map(|p| p.value.map(|v| (p.station_id.clone(), v)))
        .filter_map(|(id, v)| {
            stations::find_by_id(&data.stations, &id).map(|s| (s.name.clone(), v))
        })
        .collect();

    if !rows.is_empty() {
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        out.push(String::new());
        out.push("Wind Directions by Station:".to_string());
        for (name, degrees) in rows {
            out.push(format!(
                "  {name}: {degrees:.0}° ({})",
                wind_direction_text(Some(degrees))
            ));
        }
    }

    out.join("\n")
}

struct WindEntry {
    id: String,
    name: String,
    speed: Option<f64>,
    direction: Option<f64>,
}

fn collect_wind(speed: Option<&SourceData>, direction: Option<&SourceData>) -> Vec<WindEntry> {
    let mut merged: BTreeMap<String, WindEntry> = BTreeMap::new();

    if let Some(data) = speed {
        for station in &data.stations {
            merged.insert(
                station.id.clone(),
                WindEntry {
                    id: station.id.clone(),
                    name: station.name.clone(),
                    speed: latest_value(&data.readings, &station.id),
                    direction: None,
                },
            );
        }
    }

    if let Some(data) = direction {
        for station in &data.stations {
            let bearing = latest_value(&data.readings, &station.id);
            merged
                .entry(station.id.clone())
                .and_modify(|e| e.direction = bearing)
                .or_insert_with(|| WindEntry {
                    id: station.id.clone(),
                    name: station.name.clone(),
                    speed: None,
                    direction: bearing,
                });
        }
    }

    let mut entries: Vec<WindEntry> = merged.into_values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Combined wind speed and direction view, merged per station.
pub fn wind_report(
    speed: Option<&SourceData>,
    direction: Option<&SourceData>,
    query: Option<&str>,
) -> String {
    if speed.is_none() && direction.is_none() {
        return "Unable to fetch wind data. Please try again later.".to_string();
    }

    let entries = collect_wind(speed, direction);
    let timestamp = speed
        .and_then(|d| latest_timestamp(&d.readings))
        .or_else(|| direction.and_then(|d| latest_timestamp(&d.readings)))
        .map(format_timestamp);

    match query {
        Some(q) if q.eq_ignore_ascii_case("all") => wind_all(&entries, timestamp.as_deref()),
        Some(q) => wind_station(&entries, timestamp.as_deref(), q),
        None => wind_summary(speed, &entries, timestamp.as_deref()),
    }
}

fn wind_station(entries: &[WindEntry], timestamp: Option<&str>, query: &str) -> String {
    // Unlike the single-metric lookup, an alias whose station is
    // missing from the merged view falls back to a name/id search.
    let by_alias = stations::resolve_alias(query)
        .and_then(|id| entries.iter().find(|e| e.id.eq_ignore_ascii_case(id)));
    let target = by_alias.or_else(|| {
        let needle = query.to_lowercase();
        entries
            .iter()
            .find(|e| e.name.to_lowercase().contains(&needle) || e.id.eq_ignore_ascii_case(query))
    });

    let Some(entry) = target else {
        return station_not_found(query);
    };

    let mut out = vec![
        format!("Wind Data - {}", entry.name),
        String::new(),
        format!("Station: {} ({})", entry.name, entry.id),
    ];
    if let Some(ts) = timestamp {
        out.push(format!("Time: {ts}"));
    }
    out.push(String::new());

    match entry.speed {
        Some(knots) => {
            out.push(format!("Wind Speed: {knots:.1} knots"));
            out.push(wind_speed_category(knots).to_string());
        }
        None => out.push("Wind Speed: no data".to_string()),
    }
    match entry.direction {
        Some(bearing) => out.push(format!(
            "Wind Direction: {bearing:.0}° ({})",
            wind_direction_text(Some(bearing))
        )),
        None => out.push("Wind Direction: no data".to_string()),
    }

    out.join("\n")
}

fn wind_all(entries: &[WindEntry], timestamp: Option<&str>) -> String {
    let mut out = vec!["Complete Wind Data (All Stations)".to_string(), String::new()];
    if let Some(ts) = timestamp {
        out.push(format!("Time: {ts}"));
        out.push(String::new());
    }

    for entry in entries {
        out.push(format!("{} ({})", entry.name, entry.id));
        let speed = match entry.speed {
            Some(knots) => format!("{knots:.1} knots"),
            None => "no data".to_string(),
        };
        let direction = match entry.direction {
            Some(bearing) => format!("{bearing:.0}° ({})", wind_direction_text(Some(bearing))),
            None => "no data".to_string(),
        };
        out.push(format!("  Speed: {speed} | Direction: {direction}"));
        out.push(String::new());
    }

    out.push("Use the wind command with a station name for specific data.".to_string());
    out.join("\n")
}

fn wind_summary(
    speed: Option<&SourceData>,
    entries: &[WindEntry],
    timestamp: Option<&str>,
) -> String {
    let mut out = vec!["Wind Data Summary".to_string(), String::new()];
    if let Some(ts) = timestamp {
        out.push(format!("Time: {ts}"));
        out.push(String::new());
    }

    if let Some(data) = speed {
        let stats = summary_stats(&data.readings);
        out.push("Wind Speed Statistics:".to_string());
        out.push(format!("  Average: {:.1} knots", stats.avg));
        out.push(format!("  Range: {:.1} - {:.1} knots", stats.min, stats.max));
        out.push(format!("  Active stations: {}", stats.count));

        let mut top: Vec<(&str, f64)> = entries
            .iter()
            .filter_map(|e| e.speed.map(|v| (e.name.as_str(), v)))
            .collect();
        if !top.is_empty() {
            top.sort_by(|a, b| b.1.total_cmp(&a.1));
            out.push(String::new());
            out.push("Highest Wind Speed Locations:".to_string());
            for (i, (name, knots)) in top.iter().take(3).enumerate() {
                out.push(format!("{}. {name}: {knots:.1} knots", i + 1));
            }
        }
        out.push(String::new());
    }

    let direction_count = entries.iter().filter(|e| e.direction.is_some()).count();
    if direction_count > 0 {
        out.push(format!(
            "Wind direction data: available from {direction_count} stations"
        ));
    }

    out.join("\n")
}

/// Merged directory of every station any source knows about.
pub fn stations_list(snapshot: &WeatherSnapshot) -> String {
    let entries = merge_stations(snapshot);
    if entries.is_empty() {
        return "Unable to fetch station data. Please try again later.".to_string();
    }

    let mut out = vec!["Available Weather Stations".to_string(), String::new()];
    for entry in &entries {
        let metrics: Vec<&str> = entry.metrics.iter().map(|m| m.as_str()).collect();
        out.push(format!(
            "{} ({}) [{}]",
            entry.name,
            entry.id,
            metrics.join(", ")
        ));
    }

    out.push(String::new());
    out.push(
        "Use a station id or name with the rainfall, wind-speed or \
         wind-direction commands."
            .to_string(),
    );
    out.join("\n")
}

/// Split a report into chunks below the chat message limit, breaking
/// on line boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if !current.is_empty() && current.len() + 1 + line.len() > limit {
            parts.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

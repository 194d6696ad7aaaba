//! Station lookup: alias table, name/id resolution and the merged
//! cross-source station directory.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::{Location, Metric, Station, WeatherSnapshot};

/// Common place-names mapped to station codes, so users can say
/// "marina" instead of "S108". Process-wide read-only table.
static STATION_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("marina", "S108"),
        ("sentosa", "S60"),
        ("changi", "S107"),
        ("jurong", "S33"),
        ("woodlands", "S104"),
        ("tuas", "S115"),
        ("clementi", "S50"),
        ("bishan", "S217"),
        ("tampines", "S84"),
        ("punggol", "S81"),
        ("yishun", "S209"),
        ("hougang", "S221"),
        ("pasir ris", "S94"),
        ("bukit timah", "S90"),
        ("toa payoh", "S88"),
        ("ang mo kio", "S109"),
        ("geylang", "S215"),
        ("orchard", "S79"),
        ("scotts", "S111"),
    ])
});

/// Look up a user-friendly alias, case-insensitively.
pub fn resolve_alias(token: &str) -> Option<&'static str> {
    STATION_ALIASES.get(token.to_lowercase().as_str()).copied()
}

/// Find a station by case-insensitive substring match on its display
/// name.
///
/// Returns the *first* match in iteration order, not the best match;
/// the result therefore depends on the station ordering delivered by
/// the upstream source.
pub fn find_by_name<'a>(stations: &'a [Station], query: &str) -> Option<&'a Station> {
    let needle = query.to_lowercase();
    stations.iter().find(|s| s.name.to_lowercase().contains(&needle))
}

/// Find a station by case-insensitive exact id match.
pub fn find_by_id<'a>(stations: &'a [Station], id: &str) -> Option<&'a Station> {
    stations.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

/// Resolve a user-supplied token against a station list.
///
/// Precedence: alias, then name substring, then id. An alias hit
/// short-circuits resolution — if the aliased station is missing from
/// this source's list the lookup reports "not found" rather than
/// falling through to a name search.
pub fn resolve<'a>(stations: &'a [Station], query: &str) -> Option<&'a Station> {
    if let Some(id) = resolve_alias(query) {
        return find_by_id(stations, id);
    }

    find_by_name(stations, query).or_else(|| find_by_id(stations, query))
}

/// One station in the merged cross-source directory.
#[derive(Debug, Clone)]
pub struct StationEntry {
    pub id: String,
    pub name: String,
    pub location: Location,
    /// Metrics this station reports, in `Metric::all()` order.
    pub metrics: Vec<Metric>,
}

/// Merge the station sets of all available sources by id.
///
/// Station sets differ slightly between sources, so the union is
/// keyed on the stable station id; the result is sorted by display
/// name.
pub fn merge_stations(snapshot: &WeatherSnapshot) -> Vec<StationEntry> {
    let mut merged: HashMap<&str, StationEntry> = HashMap::new();

    for metric in Metric::all() {
        let Some(data) = snapshot.get(*metric) else {
            continue;
        };

        for station in &data.stations {
            merged
                .entry(station.id.as_str())
                .or_insert_with(|| StationEntry {
                    id: station.id.clone(),
                    name: station.name.clone(),
                    location: station.location,
                    metrics: Vec::new(),
                })
                .metrics
                .push(*metric);
        }
    }

    let mut entries: Vec<StationEntry> = merged.into_values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceData;

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            location: Location {
                latitude: 1.3,
                longitude: 103.8,
            },
        }
    }

    fn source(stations: Vec<Station>) -> SourceData {
        SourceData {
            stations,
            readings: Vec::new(),
        }
    }

    #[test]
    fn alias_lookup_is_case_insensitive() {
        assert_eq!(resolve_alias("marina"), Some("S108"));
        assert_eq!(resolve_alias("MARINA"), Some("S108"));
        assert_eq!(resolve_alias("Pasir Ris"), Some("S94"));
        assert_eq!(resolve_alias("atlantis"), None);
    }

    #[test]
    fn name_match_is_substring_and_first_wins() {
        let stations = vec![
            station("S77", "Upper Changi Road"),
            station("S107", "East Coast Parkway"),
            station("S33", "Jurong Pier Road"),
        ];

        let found = find_by_name(&stations, "changi").expect("substring match");
        assert_eq!(found.id, "S77");
        assert!(find_by_name(&stations, "ROAD").is_some());
        assert!(find_by_name(&stations, "nowhere").is_none());
    }

    #[test]
    fn id_match_ignores_case() {
        let stations = vec![station("S108", "Marina Gardens Drive")];
        assert_eq!(find_by_id(&stations, "s108").map(|s| s.name.as_str()),
                   Some("Marina Gardens Drive"));
        assert!(find_by_id(&stations, "S999").is_none());
    }

    #[test]
    fn alias_wins_over_name_substring() {
        // "marina" is both an alias for S108 and a substring of the
        // S123 display name; the alias must win.
        let stations = vec![
            station("S123", "Old Marina Road"),
            station("S108", "Marina Gardens Drive"),
        ];

        let found = resolve(&stations, "marina").expect("alias resolution");
        assert_eq!(found.id, "S108");
    }

    #[test]
    fn alias_hit_does_not_fall_through_to_name_search() {
        // Alias resolves to S108 which this source does not carry.
        let stations = vec![station("S123", "Old Marina Road")];
        assert!(resolve(&stations, "marina").is_none());
    }

    #[test]
    fn resolve_falls_back_to_name_then_id() {
        let stations = vec![station("S50", "Clementi Road"), station("S79", "Somerset Road")];

        assert_eq!(resolve(&stations, "somerset").map(|s| s.id.as_str()), Some("S79"));
        assert_eq!(resolve(&stations, "s50").map(|s| s.id.as_str()), Some("S50"));
        assert!(resolve(&stations, "unknown").is_none());
    }

    #[test]
    fn merge_unions_station_sets_by_id() {
        let snapshot = WeatherSnapshot {
            rainfall: Some(source(vec![
                station("S108", "Marina Gardens Drive"),
                station("S50", "Clementi Road"),
            ])),
            wind_speed: Some(source(vec![station("S108", "Marina Gardens Drive")])),
            wind_direction: None,
        };

        let entries = merge_stations(&snapshot);
        assert_eq!(entries.len(), 2);

        // sorted by display name
        assert_eq!(entries[0].id, "S50");
        assert_eq!(entries[0].metrics, vec![Metric::Rainfall]);
        assert_eq!(entries[1].id, "S108");
        assert_eq!(entries[1].metrics, vec![Metric::Rainfall, Metric::WindSpeed]);
    }

    #[test]
    fn merge_of_empty_snapshot_is_empty() {
        assert!(merge_stations(&WeatherSnapshot::default()).is_empty());
    }
}

//! Textual classification of raw readings: compass direction,
//! rainfall intensity and wind category.

/// The eight octant anchors in ascending-angle order.
const OCTANTS: [(f64, &str); 8] = [
    (0.0, "N"),
    (45.0, "NE"),
    (90.0, "E"),
    (135.0, "SE"),
    (180.0, "S"),
    (225.0, "SW"),
    (270.0, "W"),
    (315.0, "NW"),
];

/// Map a wind bearing to a compass label.
///
/// Bearings are normalized into `[0, 360)` first. A bearing within
/// 22.5° of an octant anchor gets that anchor's label (ties resolve to
/// the lower-angle anchor, so exactly 22.5° is "N"); anything further
/// out gets a hyphenated composite of the two neighbouring anchors in
/// ascending-angle order, wrapping past NW back to N. A missing
/// bearing is "Unknown", never an error.
pub fn wind_direction_text(degrees: Option<f64>) -> String {
    let Some(degrees) = degrees else {
        return "Unknown".to_string();
    };

    let degrees = degrees.rem_euclid(360.0);

    let mut closest = OCTANTS[0];
    for candidate in OCTANTS {
        if (candidate.0 - degrees).abs() < (closest.0 - degrees).abs() {
            closest = candidate;
        }
    }

    if (closest.0 - degrees).abs() <= 22.5 {
        return closest.1.to_string();
    }

    // Between two anchors: compose the neighbours around the bearing.
    for (i, (angle, label)) in OCTANTS.iter().enumerate() {
        if degrees < *angle {
            let prev = if i == 0 { OCTANTS[7].1 } else { OCTANTS[i - 1].1 };
            return format!("{prev}-{label}");
        }
    }

    // Past the last anchor; wraps around to N.
    format!("{}-{}", OCTANTS[7].1, OCTANTS[0].1)
}

/// Rainfall description for a reading in millimetres.
pub fn rainfall_intensity(mm: f64) -> &'static str {
    if mm == 0.0 {
        "No rainfall detected"
    } else if mm < 2.5 {
        "Light rainfall"
    } else if mm < 10.0 {
        "Moderate rainfall"
    } else if mm < 50.0 {
        "Heavy rainfall"
    } else {
        "Very heavy rainfall"
    }
}

/// Wind category for a speed in knots (Beaufort scale approximation).
pub fn wind_speed_category(knots: f64) -> &'static str {
    if knots < 1.0 {
        "Calm"
    } else if knots < 7.0 {
        "Light breeze"
    } else if knots < 17.0 {
        "Moderate breeze"
    } else if knots < 28.0 {
        "Strong breeze"
    } else {
        "Very strong wind"
    }
}

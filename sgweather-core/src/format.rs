//! Display formatting for upstream values.

use chrono::DateTime;
use tracing::warn;

/// Format an ISO-8601 timestamp for display, e.g.
/// `"04 May 2024, 09:05 AM SGT"`.
///
/// Upstream timestamps already carry the +08:00 Singapore offset, so
/// the value is formatted in its own offset. Unparseable input is
/// logged and returned verbatim rather than failing the render.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%d %b %Y, %I:%M %p SGT").to_string(),
        Err(err) => {
            warn!("failed to parse timestamp {raw:?}: {err}");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sgt_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-04T09:05:00+08:00"),
            "04 May 2024, 09:05 AM SGT"
        );
    }

    #[test]
    fn formats_afternoon_as_pm() {
        assert_eq!(
            format_timestamp("2024-12-31T15:45:00+08:00"),
            "31 Dec 2024, 03:45 PM SGT"
        );
    }

    #[test]
    fn unparseable_input_is_returned_verbatim() {
        assert_eq!(format_timestamp("not-a-timestamp"), "not-a-timestamp");
    }
}

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Length of one KPI comparison window.
pub const PERIOD_DAYS: i64 = 30;

/// Parse a date-of-service string into a UTC instant.
///
/// Handles RFC 3339 (including the `Z` suffix), ISO date-times with or
/// without fractional seconds, plain `YYYY-MM-DD` dates and US `MM/DD/YYYY`
/// dates.  Date-only values resolve to midnight UTC.  Returns `None` for
/// empty or unrecognised strings.
pub fn parse_service_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    debug!("could not parse date of service \"{}\"", s);
    None
}

/// Three-letter English month abbreviation for `dt`, e.g. `"Jan"`.
pub fn month_label(dt: DateTime<Utc>) -> String {
    dt.format("%b").to_string()
}

/// The two comparison windows anchored at a given "now".
///
/// * current  = `[now - 30d, now]`
/// * previous = `[now - 60d, now - 30d)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    pub now: DateTime<Utc>,
    pub current_start: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
}

impl PeriodWindows {
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let current_start = now - Duration::days(PERIOD_DAYS);
        Self {
            now,
            current_start,
            previous_start: current_start - Duration::days(PERIOD_DAYS),
        }
    }

    pub fn in_current(&self, dt: DateTime<Utc>) -> bool {
        dt >= self.current_start && dt <= self.now
    }

    pub fn in_previous(&self, dt: DateTime<Utc>) -> bool {
        dt >= self.previous_start && dt < self.current_start
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let dt = parse_service_date("2024-01-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_service_date("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_z_suffix() {
        let dt = parse_service_date("2024-03-01T00:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_and_us_date() {
        assert_eq!(
            parse_service_date("2024-01-15 12:00:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_service_date("01/15/2024").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_service_date("").is_none());
        assert!(parse_service_date("   ").is_none());
        assert!(parse_service_date("yesterday").is_none());
        assert!(parse_service_date("2024-13-45").is_none());
    }

    #[test]
    fn test_month_label() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 3, 0, 0, 0).unwrap();
        assert_eq!(month_label(dt), "Sep");
    }

    #[test]
    fn test_period_windows_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let w = PeriodWindows::ending_at(now);

        assert!(w.in_current(now));
        assert!(w.in_current(w.current_start));
        assert!(!w.in_previous(w.current_start));
        assert!(w.in_previous(w.previous_start));
        assert!(!w.in_current(now + Duration::seconds(1)));
        assert!(!w.in_previous(w.previous_start - Duration::seconds(1)));
    }
}

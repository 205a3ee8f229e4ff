//! Date helpers for the listing endpoints
//!
//! The collection and published endpoints take dates as path segments in
//! ISO 8601 form (`2024-01-01T00:00:00Z`). Parsing accepts the three shapes
//! the API hands back in payloads.

use crate::error::{GovInfoError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a timestamp the way the API expects in request paths.
pub fn format_iso_date(dt: DateTime<Utc>) -> String {
    dt.format(ISO_FORMAT).to_string()
}

/// Parse `YYYY-MM-DDTHH:MM:SSZ`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
///
/// Offset-qualified RFC 3339 strings are accepted as well and normalized to UTC.
pub fn parse_iso_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, ISO_FORMAT) {
        return Ok(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(GovInfoError::InvalidDate(value.to_string()))
}

/// Range covering the last `days` days, ending now.
pub fn date_range_last_days(days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    date_range_last_days_from(Utc::now(), days)
}

/// Same as [`date_range_last_days`] with an explicit end.
pub fn date_range_last_days_from(
    end: DateTime<Utc>,
    days: i64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (end - Duration::days(days), end)
}

/// First and last day of the month before `today`.
pub fn last_month_range(today: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let first_this_month = today
        .date_naive()
        .with_day(1)
        .ok_or_else(|| GovInfoError::InvalidDate(today.to_rfc3339()))?;
    let last_prev = first_this_month - Duration::days(1);
    let first_prev = last_prev
        .with_day(1)
        .ok_or_else(|| GovInfoError::InvalidDate(today.to_rfc3339()))?;

    Ok((start_of_day(first_prev)?, start_of_day(last_prev)?))
}

/// January 1st of the current year up to `today`.
pub fn year_to_date_range(today: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let jan_first = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .ok_or_else(|| GovInfoError::InvalidDate(today.to_rfc3339()))?;
    Ok((start_of_day(jan_first)?, today))
}

fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| GovInfoError::InvalidDate(date.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(
            format_iso_date(ts("2024-01-03T10:20:30Z")),
            "2024-01-03T10:20:30Z"
        );
    }

    #[test]
    fn test_parse_iso_date_formats() {
        let expected = ts("2024-01-03T10:20:30Z");
        assert_eq!(parse_iso_date("2024-01-03T10:20:30Z").unwrap(), expected);
        assert_eq!(parse_iso_date("2024-01-03T10:20:30").unwrap(), expected);
        assert_eq!(
            parse_iso_date("2024-01-03").unwrap(),
            ts("2024-01-03T00:00:00Z")
        );
        assert_eq!(
            parse_iso_date("2024-01-03T05:20:30-05:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert!(matches!(
            parse_iso_date("January 3rd"),
            Err(GovInfoError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_last_days_range() {
        let end = ts("2024-03-31T00:00:00Z");
        let (start, stop) = date_range_last_days_from(end, 30);
        assert_eq!(start, ts("2024-03-01T00:00:00Z"));
        assert_eq!(stop, end);
    }

    #[test]
    fn test_last_month_range_crosses_year() {
        let (start, end) = last_month_range(ts("2024-01-15T12:00:00Z")).unwrap();
        assert_eq!(start, ts("2023-12-01T00:00:00Z"));
        assert_eq!(end, ts("2023-12-31T00:00:00Z"));
    }

    #[test]
    fn test_year_to_date_range() {
        let today = ts("2024-06-15T08:00:00Z");
        let (start, end) = year_to_date_range(today).unwrap();
        assert_eq!(start, ts("2024-01-01T00:00:00Z"));
        assert_eq!(end, today);
    }
}

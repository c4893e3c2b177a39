use thiserror::Error;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

#[derive(Debug, Error)]
#[error("Invalid date: {0}")]
pub struct InvalidDate(pub String);

/// Inclusive creation-time window covering whole calendar days (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl DateRange {
    /// Both bounds are needed for a filter; a lone bound is ignored.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, InvalidDate> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());
        match (start, end) {
            (Some(s), Some(e)) => Ok(Some(Self::days(parse_day(s)?, parse_day(e)?)?)),
            _ => Ok(None),
        }
    }

    /// 00:00:00.000 of `first` through 23:59:59.999 of `last`.
    pub fn days(first: Date, last: Date) -> Result<Self, InvalidDate> {
        let end = last
            .with_hms_milli(23, 59, 59, 999)
            .map_err(|e| InvalidDate(e.to_string()))?;
        Ok(Self {
            start: first.midnight().assume_utc(),
            end: end.assume_utc(),
        })
    }

    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC calendar day is used.
fn parse_day(raw: &str) -> Result<Date, InvalidDate> {
    if let Ok(d) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(d);
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(|ts| ts.to_offset(time::UtcOffset::UTC).date())
        .map_err(|_| InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn range_is_inclusive_at_day_granularity() {
        let r = DateRange::from_query(Some("2024-01-05"), Some("2024-01-05"))
            .unwrap()
            .unwrap();
        assert_eq!(r.start, datetime!(2024-01-05 00:00:00.000 UTC));
        assert_eq!(r.end, datetime!(2024-01-05 23:59:59.999 UTC));

        assert!(r.contains(datetime!(2024-01-05 00:00:00.000 UTC)));
        assert!(r.contains(datetime!(2024-01-05 23:59:59.999 UTC)));
        assert!(!r.contains(datetime!(2024-01-06 00:00:00.000 UTC)));
        assert!(!r.contains(datetime!(2024-01-04 23:59:59.999 UTC)));
    }

    #[test]
    fn absent_or_lone_bounds_mean_no_filter() {
        assert_eq!(DateRange::from_query(None, None).unwrap(), None);
        assert_eq!(DateRange::from_query(Some("2024-01-01"), None).unwrap(), None);
        assert_eq!(DateRange::from_query(None, Some("2024-01-01")).unwrap(), None);
        assert_eq!(DateRange::from_query(Some(""), Some("")).unwrap(), None);
    }

    #[test]
    fn rfc3339_bounds_use_their_day() {
        let r = DateRange::from_query(Some("2024-03-01T15:30:00Z"), Some("2024-03-02T01:00:00+00:00"))
            .unwrap()
            .unwrap();
        assert_eq!(r.start, datetime!(2024-03-01 00:00 UTC));
        assert_eq!(r.end, datetime!(2024-03-02 23:59:59.999 UTC));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = DateRange::from_query(Some("yesterday"), Some("2024-01-01")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date: yesterday");
        assert!(DateRange::from_query(Some("2024-02-30"), Some("2024-03-01")).is_err());
    }
}

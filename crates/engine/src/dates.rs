use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::{EngineError, ResultEngine};

/// How a row without a `date` gets one from its `timestamp`.
///
/// The default slices the UTC calendar date out of the instant, which is what
/// the sheet itself does. A row appended at 23:00 local time east of UTC can
/// therefore show up under the previous day; `Zone` opts into converting first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateConvention {
    #[default]
    Utc,
    Zone(Tz),
}

impl DateConvention {
    /// Builds the convention from an optional IANA timezone name.
    pub fn from_name(name: Option<&str>) -> ResultEngine<Self> {
        match name.map(str::trim).filter(|name| !name.is_empty()) {
            None => Ok(Self::Utc),
            Some(name) => name
                .parse::<Tz>()
                .map(Self::Zone)
                .map_err(|_| EngineError::InvalidTimezone(name.to_string())),
        }
    }

    /// Display date of a row: the `date` cell when it is non-empty, otherwise the
    /// calendar date of `timestamp`, otherwise an empty string.
    pub fn display_date(self, date: Option<&str>, timestamp: Option<&str>) -> String {
        if let Some(date) = date.filter(|date| !date.is_empty()) {
            return date.to_string();
        }

        timestamp
            .and_then(|ts| self.date_of(ts))
            .map(|day| day.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn date_of(self, timestamp: &str) -> Option<NaiveDate> {
        let timestamp = timestamp.trim();
        let instant = parse_instant(timestamp);

        match (instant, self) {
            (Some(instant), Self::Utc) => Some(instant.date_naive()),
            (Some(instant), Self::Zone(tz)) => Some(instant.with_timezone(&tz).date_naive()),
            (None, _) => NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok(),
        }
    }
}

/// RFC 3339 first; an offset-less `YYYY-MM-DDTHH:MM:SS[.fff]` is read as UTC.
fn parse_instant(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

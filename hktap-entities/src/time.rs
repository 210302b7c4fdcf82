use std::{fmt, str::FromStr};

use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, formatting::Formattable,
    macros::format_description, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

/// A point in time in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

#[derive(Debug, Error)]
#[error("Invalid date/time: {0}")]
pub struct TimestampParseError(String);

impl Timestamp {
    pub fn now() -> Self {
        Self::truncated(OffsetDateTime::now_utc())
    }

    fn truncated(dt: OffsetDateTime) -> Self {
        let dt = dt.to_offset(UtcOffset::UTC);
        let millis = u32::from(dt.millisecond());
        Self(dt.replace_nanosecond(millis * 1_000_000).unwrap_or(dt))
    }

    pub fn try_from_millis(millis: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .ok()
            .map(Self)
    }

    pub fn try_from_secs(secs: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(secs).ok().map(Self)
    }

    pub fn as_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn as_secs(self) -> i64 {
        self.0.unix_timestamp()
    }

    fn format_utc(self, format: &(impl Formattable + ?Sized)) -> String {
        // Every component is available on an `OffsetDateTime`
        self.0.format(format).unwrap_or_else(|_| self.0.to_string())
    }

    /// Compact UTC form as used by iCalendar, e.g. `20240115T090000Z`.
    pub fn to_calendar_utc(self) -> String {
        self.format_utc(format_description!(
            "[year][month][day]T[hour][minute][second]Z"
        ))
    }

    /// `YYYY-MM-DDThh:mm:ssZ` without fractional seconds.
    pub fn to_rfc3339_secs(self) -> String {
        self.format_utc(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
    }

    /// Short human readable form, e.g. `2024-01-15 09:00`.
    pub fn to_short_utc(self) -> String {
        self.format_utc(format_description!("[year]-[month]-[day] [hour]:[minute]"))
    }

    /// Parses RFC 3339 date/times or naive date/times that are
    /// interpreted as UTC.
    ///
    /// Accepted naive forms: `YYYY-MM-DDThh:mm:ss[.fff]`, `YYYY-MM-DDThh:mm`
    /// and the same with a space instead of `T`.
    pub fn parse_date_time(s: &str) -> Result<Self, TimestampParseError> {
        let s = s.trim();
        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(Self::truncated(dt));
        }
        let normalized = s.replacen(' ', "T", 1);
        let naive = PrimitiveDateTime::parse(
            &normalized,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                &normalized,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                &normalized,
                format_description!("[year]-[month]-[day]T[hour]:[minute]"),
            )
        })
        .map_err(|_| TimestampParseError(s.to_owned()))?;
        Ok(Self::truncated(naive.assume_utc()))
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self::truncated(from)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_date_time(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_rfc3339_secs())
    }
}

//! GPS time values and conversions to and from UTC.
//!
//! GPS time counts SI seconds since 1980-01-06T00:00:00 UTC and does not
//! observe leap seconds, so it runs ahead of UTC by the number of leap
//! seconds inserted since the GPS epoch.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;

use crate::error::{PlotError, Result};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Unix timestamp of the GPS epoch (1980-01-06T00:00:00 UTC).
const GPS_EPOCH_UNIX: i64 = 315_964_800;

/// UTC dates whose midnight immediately follows an inserted leap second.
const LEAP_SECOND_DATES: [(i32, u32, u32); 18] = [
    (1981, 7, 1),
    (1982, 7, 1),
    (1983, 7, 1),
    (1985, 7, 1),
    (1988, 1, 1),
    (1990, 1, 1),
    (1991, 1, 1),
    (1992, 7, 1),
    (1993, 7, 1),
    (1994, 7, 1),
    (1996, 1, 1),
    (1997, 7, 1),
    (1999, 1, 1),
    (2006, 1, 1),
    (2009, 1, 1),
    (2012, 7, 1),
    (2015, 7, 1),
    (2017, 1, 1),
];

/// Unix timestamps at which each leap second took effect.
static LEAP_SECONDS_UNIX: Lazy<Vec<i64>> = Lazy::new(|| {
    LEAP_SECOND_DATES
        .iter()
        .filter_map(|&(year, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp())
        })
        .collect()
});

/// GPS seconds at which each leap second took effect.
static LEAP_SECONDS_GPS: Lazy<Vec<i64>> = Lazy::new(|| {
    LEAP_SECONDS_UNIX
        .iter()
        .enumerate()
        .map(|(index, unix)| unix - GPS_EPOCH_UNIX + index as i64 + 1)
        .collect()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%b %d %Y %H:%M:%S%.f",
    "%b %d %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%b %d %Y", "%B %d %Y", "%d %b %Y"];

/// A GPS timestamp with nanosecond precision.
///
/// The nanosecond field is always in `0..1_000_000_000`; negative times
/// carry the sign in the seconds field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LigoTimeGps {
    seconds: i64,
    nanoseconds: i64,
}

impl LigoTimeGps {
    /// Create a GPS time, normalizing nanoseconds into range.
    pub fn new(seconds: i64, nanoseconds: i64) -> Self {
        let seconds = seconds + nanoseconds.div_euclid(NANOS_PER_SECOND);
        let nanoseconds = nanoseconds.rem_euclid(NANOS_PER_SECOND);
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Convert a floating-point GPS time, rounding to the nearest nanosecond.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() >= i64::MAX as f64 / 2.0 {
            return None;
        }
        let seconds = value.floor();
        let nanoseconds = ((value - seconds) * NANOS_PER_SECOND as f64).round() as i64;
        Some(Self::new(seconds as i64, nanoseconds))
    }

    /// Whole GPS seconds.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds past [`seconds`](Self::seconds).
    pub fn nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// The time as a float.
    pub fn as_f64(&self) -> f64 {
        self.seconds as f64 + self.nanoseconds as f64 / NANOS_PER_SECOND as f64
    }

    /// Convert to a UTC date-time, applying leap seconds.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let leaps = LEAP_SECONDS_GPS
            .iter()
            .filter(|&&instant| self.seconds >= instant)
            .count() as i64;
        let unix = self.seconds + GPS_EPOCH_UNIX - leaps;
        DateTime::from_timestamp(unix, self.nanoseconds as u32)
    }

    /// Convert a UTC date-time to GPS time, applying leap seconds.
    pub fn from_utc(time: DateTime<Utc>) -> Self {
        let unix = time.timestamp();
        let leaps = LEAP_SECONDS_UNIX
            .iter()
            .filter(|&&instant| unix >= instant)
            .count() as i64;
        Self::new(
            unix - GPS_EPOCH_UNIX + leaps,
            i64::from(time.timestamp_subsec_nanos()),
        )
    }
}

impl fmt::Display for LigoTimeGps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = i128::from(self.seconds) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanoseconds);
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        let seconds = total / i128::from(NANOS_PER_SECOND);
        let fraction = total % i128::from(NANOS_PER_SECOND);
        if fraction == 0 {
            return write!(f, "{sign}{seconds}");
        }
        let digits = format!("{fraction:09}");
        write!(f, "{sign}{seconds}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for LigoTimeGps {
    type Err = PlotError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || PlotError::InvalidGpsTime {
            input: text.to_owned(),
        };
        let trimmed = text.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            // exponent forms and friends go through the float parser
            let value: f64 = trimmed.parse().map_err(|_| invalid())?;
            return Self::from_f64(value).ok_or_else(invalid);
        }
        let seconds: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut nanos = 0_i64;
        for (position, digit) in fraction.bytes().take(9).enumerate() {
            nanos += i64::from(digit - b'0') * 10_i64.pow(8 - position as u32);
        }
        if negative {
            Ok(Self::new(-seconds, -nanos))
        } else {
            Ok(Self::new(seconds, nanos))
        }
    }
}

impl From<LigoTimeGps> for f64 {
    fn from(value: LigoTimeGps) -> Self {
        value.as_f64()
    }
}

/// Anything that can be interpreted as a GPS time.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsInput {
    /// A GPS time as a float.
    Number(f64),
    /// An exact GPS time.
    Gps(LigoTimeGps),
    /// A UTC date-time.
    DateTime(DateTime<Utc>),
    /// A number or a calendar date in text form.
    Text(String),
}

impl From<f64> for GpsInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for GpsInput {
    fn from(value: i64) -> Self {
        Self::Gps(LigoTimeGps::new(value, 0))
    }
}

impl From<i32> for GpsInput {
    fn from(value: i32) -> Self {
        Self::Gps(LigoTimeGps::new(i64::from(value), 0))
    }
}

impl From<u32> for GpsInput {
    fn from(value: u32) -> Self {
        Self::Gps(LigoTimeGps::new(i64::from(value), 0))
    }
}

impl From<LigoTimeGps> for GpsInput {
    fn from(value: LigoTimeGps) -> Self {
        Self::Gps(value)
    }
}

impl From<DateTime<Utc>> for GpsInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDateTime> for GpsInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value.and_utc())
    }
}

impl From<&str> for GpsInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for GpsInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Convert a number, date-time or date string into a GPS time.
///
/// Strings may hold a decimal GPS time, an ISO-8601 style date or
/// date-time, a `Mon DD YYYY [HH:MM:SS]` date, or one of `now`, `today`,
/// `yesterday` and `tomorrow`. Dates without a zone are taken as UTC.
pub fn to_gps(input: impl Into<GpsInput>) -> Result<LigoTimeGps> {
    match input.into() {
        GpsInput::Number(value) => {
            LigoTimeGps::from_f64(value).ok_or_else(|| PlotError::InvalidGpsTime {
                input: value.to_string(),
            })
        }
        GpsInput::Gps(value) => Ok(value),
        GpsInput::DateTime(value) => Ok(LigoTimeGps::from_utc(value)),
        GpsInput::Text(text) => parse_gps_text(&text),
    }
}

fn parse_gps_text(text: &str) -> Result<LigoTimeGps> {
    let trimmed = text.trim();
    if let Some(time) = parse_relative_day(trimmed) {
        return Ok(LigoTimeGps::from_utc(time));
    }
    if let Ok(value) = trimmed.parse::<LigoTimeGps>() {
        return Ok(value);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(LigoTimeGps::from_utc(time.with_timezone(&Utc)));
    }
    let naive = trimmed
        .strip_suffix("UTC")
        .or_else(|| trimmed.strip_suffix('Z'))
        .unwrap_or(trimmed)
        .trim_end();
    for format in DATETIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(LigoTimeGps::from_utc(time.and_utc()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            return Ok(LigoTimeGps::from_utc(date.and_time(NaiveTime::MIN).and_utc()));
        }
    }
    Err(PlotError::InvalidGpsTime {
        input: text.to_owned(),
    })
}

fn parse_relative_day(text: &str) -> Option<DateTime<Utc>> {
    let now = Utc::now();
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    match text.to_ascii_lowercase().as_str() {
        "now" => Some(now),
        "today" => Some(midnight),
        "yesterday" => midnight.checked_sub_days(Days::new(1)),
        "tomorrow" => midnight.checked_add_days(Days::new(1)),
        _ => None,
    }
}

/// Format a GPS time as a UTC timestamp, `YYYY-MM-DD HH:MM:SS[.fff]`.
///
/// Milliseconds are kept with trailing zeros (and a bare trailing dot)
/// removed, so whole seconds print without a fractional part.
pub fn format_utc(gps: LigoTimeGps) -> Option<String> {
    let utc = gps.to_utc()?;
    let whole = utc.format("%Y-%m-%d %H:%M:%S").to_string();
    let millis = utc.format("%.3f").to_string();
    let fraction = millis.trim_end_matches('0').trim_end_matches('.');
    Some(format!("{whole}{fraction}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_trims_fraction() {
        assert_eq!(LigoTimeGps::new(1126259462, 400_000_000).to_string(), "1126259462.4");
        assert_eq!(LigoTimeGps::new(1126259462, 0).to_string(), "1126259462");
        assert_eq!(LigoTimeGps::new(-1, 500_000_000).to_string(), "-0.5");
    }

    #[test]
    fn parse_decimal_is_exact() {
        let gps: LigoTimeGps = "1126259462.391".parse().unwrap();
        assert_eq!(gps.seconds(), 1126259462);
        assert_eq!(gps.nanoseconds(), 391_000_000);
        let negative: LigoTimeGps = "-0.25".parse().unwrap();
        assert_eq!(negative, LigoTimeGps::new(-1, 750_000_000));
    }

    #[test]
    fn from_f64_rounds_to_nanoseconds() {
        // 1126259462.4 is stored as 1126259462.400000095367...
        let gps = LigoTimeGps::from_f64(1126259462.4).unwrap();
        assert_eq!(gps.seconds(), 1126259462);
        assert_eq!(gps.nanoseconds(), 400_000_095);
        assert_eq!(gps.to_string(), "1126259462.400000095");
        let exact = LigoTimeGps::from_f64(1126259462.25).unwrap();
        assert_eq!(exact.to_string(), "1126259462.25");
        assert!(LigoTimeGps::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn utc_roundtrip_gw150914() {
        let utc = Utc.with_ymd_and_hms(2015, 9, 14, 9, 50, 45).unwrap();
        let gps = LigoTimeGps::from_utc(utc);
        assert_eq!(gps.seconds(), 1126259462);
        assert_eq!(gps.to_utc().unwrap(), utc);
    }

    #[test]
    fn leap_second_2017_boundary() {
        let utc = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(LigoTimeGps::from_utc(utc).seconds(), 1167264018);
        assert_eq!(LigoTimeGps::new(1167264018, 0).to_utc().unwrap(), utc);
    }

    #[test]
    fn to_gps_accepts_dates() {
        let expected = LigoTimeGps::new(1126259462, 0);
        assert_eq!(to_gps("2015-09-14 09:50:45").unwrap(), expected);
        assert_eq!(to_gps("2015-09-14T09:50:45Z").unwrap(), expected);
        assert_eq!(to_gps("Sep 14 2015 09:50:45").unwrap(), expected);
        assert_eq!(to_gps("1126259462").unwrap(), expected);
        assert_eq!(to_gps(1126259462_i64).unwrap(), expected);
        assert_eq!(to_gps("2015-09-14").unwrap().seconds(), 1126224017);
    }

    #[test]
    fn to_gps_rejects_garbage() {
        assert!(matches!(
            to_gps("not a date"),
            Err(PlotError::InvalidGpsTime { .. })
        ));
    }

    #[test]
    fn format_utc_strips_zeros() {
        let gps = LigoTimeGps::new(1126259462, 400_000_000);
        assert_eq!(format_utc(gps).unwrap(), "2015-09-14 09:50:45.4");
        let whole = LigoTimeGps::new(1126259462, 0);
        assert_eq!(format_utc(whole).unwrap(), "2015-09-14 09:50:45");
        let midnight = LigoTimeGps::new(1126224017, 0);
        assert_eq!(format_utc(midnight).unwrap(), "2015-09-14 00:00:00");
    }
}

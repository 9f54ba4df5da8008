//! Conversions of `xs:duration` and `xs:dateTime` attribute values into seconds.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::{MpdError, MpdResult};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;
// Calendar units have no fixed length; a year is 365 days and a month 30 days here.
const SECONDS_PER_MONTH: f64 = 30.0 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

// Example: "PT0H9M55.46S", "P1DT12H", "-PT1.5S"
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<sign>-)?P(?:(?P<years>\d+(?:\.\d+)?)Y)?(?:(?P<months>\d+(?:\.\d+)?)M)?(?:(?P<weeks>\d+(?:\.\d+)?)W)?(?:(?P<days>\d+(?:\.\d+)?)D)?(?:T(?:(?P<hours>\d+(?:\.\d+)?)H)?(?:(?P<minutes>\d+(?:\.\d+)?)M)?(?:(?P<seconds>\d+(?:\.\d*)?)S)?)?$",
    )
    .unwrap()
});

const COMPONENTS: [(&str, f64); 7] = [
    ("years", SECONDS_PER_YEAR),
    ("months", SECONDS_PER_MONTH),
    ("weeks", 7.0 * SECONDS_PER_DAY),
    ("days", SECONDS_PER_DAY),
    ("hours", SECONDS_PER_HOUR),
    ("minutes", SECONDS_PER_MINUTE),
    ("seconds", 1.0),
];

/// Converts an `xs:duration` into seconds.
pub fn parse_duration(value: &str) -> MpdResult<f64> {
    let malformed = || MpdError::MalformedDuration(value.to_string());

    let trimmed = value.trim();
    if trimmed.ends_with('T') {
        return Err(malformed());
    }
    let caps = DURATION_REGEX.captures(trimmed).ok_or_else(malformed)?;

    let mut seen = false;
    let mut seconds = 0.0;
    for (name, scale) in COMPONENTS {
        if let Some(component) = caps.name(name) {
            let amount: f64 = component.as_str().parse().map_err(|_| malformed())?;
            seconds += amount * scale;
            seen = true;
        }
    }
    if !seen {
        return Err(malformed());
    }

    if caps.name("sign").is_some() {
        seconds = -seconds;
    }
    Ok(seconds)
}

/// Parses an `xs:dateTime`. A value without a zone offset is read as UTC.
pub fn parse_datetime(value: &str) -> MpdResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| MpdError::MalformedDateTime(value.to_string()))
}

/// Seconds elapsed since the Unix epoch.
pub fn datetime_to_seconds(datetime: &DateTime<Utc>) -> f64 {
    datetime.timestamp_micros() as f64 / 1_000_000.0
}

/// Seconds of an optional `xs:duration`, `default` when the attribute is absent.
pub fn duration_or(value: Option<&str>, default: f64) -> MpdResult<f64> {
    value.map_or(Ok(default), parse_duration)
}

/// Seconds since the Unix epoch of an optional `xs:dateTime`.
pub fn epoch_seconds(value: Option<&str>) -> MpdResult<Option<f64>> {
    value
        .map(|value| parse_datetime(value).map(|datetime| datetime_to_seconds(&datetime)))
        .transpose()
}

pub fn seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_micros((seconds * 1_000_000.0).round() as i64)
}

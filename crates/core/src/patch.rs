//! Lenient input parsing for create/update payloads.
//!
//! The task editor posts dates as ISO strings (sometimes bare dates or
//! `datetime-local` values) and minute counts as either numbers or strings.
//! Update payloads are tri-state: a field that is absent leaves the column
//! alone, an explicit `null` (or empty string) clears it, and a value sets it.
//! Tri-state fields are modelled as `Option<Option<T>>`.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{Minutes, Timestamp};

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM[:SS]` (interpreted as UTC) and
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Like [`parse_timestamp`], but a bare date resolves to the last
/// millisecond of that day.
pub fn parse_timestamp_end_of_day(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    parse_timestamp(raw)
}

/// Deserialize a field so that explicit `null` is distinguishable from
/// absence. Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Optional timestamp on create payloads. Empty string is treated as absent.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{s}'"))),
    }
}

/// Tri-state timestamp on update payloads.
pub fn nullable_timestamp<'de, D>(deserializer: D) -> Result<Option<Option<Timestamp>>, D::Error>
where
    D: Deserializer<'de>,
{
    timestamp(deserializer).map(Some)
}

/// Optional minute count on create payloads: number, numeric string, or
/// empty string (absent).
pub fn minutes<'de, D>(deserializer: D) -> Result<Option<Minutes>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| Minutes::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid minute count {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<Minutes>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid minute count '{s}'"))),
        Some(other) => Err(D::Error::custom(format!("invalid minute count {other}"))),
    }
}

/// Tri-state minute count on update payloads.
pub fn nullable_minutes<'de, D>(deserializer: D) -> Result<Option<Option<Minutes>>, D::Error>
where
    D: Deserializer<'de>,
{
    minutes(deserializer).map(Some)
}

//! Publish timestamps: lenient parsing from front matter, strftime formatting.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};
use serde::{Deserialize, Deserializer, de};
use std::fmt::Write;
use thiserror::Error;

/// Timestamp with the offset it was written in
pub type Timestamp = DateTime<FixedOffset>;

/// Datetime layouts without an offset, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid time format `{0}`")]
    Format(String),
}

/// Parse a publish date as written in front matter.
///
/// Accepts RFC 3339 (`2024-06-15T14:30:00+02:00`), `2024-06-15 14:30:00 +02:00`,
/// offset-less datetimes (UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Some(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Format a timestamp with a strftime pattern (`%Y-%m-%d`, `%B %e, %Y`, ...).
///
/// Unknown specifiers are rejected up front; chrono would otherwise panic
/// while displaying them.
pub fn format_time(format: &str, ts: &Timestamp) -> Result<String, DateError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(DateError::Format(format.to_owned()));
    }

    let mut out = String::new();
    write!(out, "{}", ts.format_with_items(items.iter()))
        .map_err(|_| DateError::Format(format.to_owned()))?;
    Ok(out)
}

/// Serde adapter for optional publish dates written as strings.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
}

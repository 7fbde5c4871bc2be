//! Calendar-date handling for stored expense dates
//!
//! The backend may return an expense date either as `YYYY-MM-DD` or as a
//! full timestamp. Only the calendar date as written is kept; the offset is
//! not applied.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a stored date value, accepting a plain date or a timestamp
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    // PostgREST renders `timestamp` (without zone) with a space or a `T`
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f%#z"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(ts.date());
        }
        if let Ok(ts) = DateTime::parse_from_str(value, layout) {
            return Some(ts.date_naive());
        }
    }
    None
}

/// Serde adapter: write `YYYY-MM-DD`, read a date or timestamp
pub mod stored {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_stored_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }
}

//! Timestamp normalization
//!
//! Source timestamps look like `Dec-10-01 10:00:00` (abbreviated month,
//! day, two-digit year, 24-hour time). Output is `2001-12-10 10:00:00`.

use crate::constants::{CANONICAL_TIMESTAMP_FORMAT, SOURCE_TIMESTAMP_FORMAT};
use chrono::{Datelike, NaiveDateTime};
use tracing::warn;

/// Outcome of normalizing one timestamp value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The value parsed and was rewritten in canonical form
    Canonical(String),
    /// The value did not parse and is carried through unchanged
    Fallback(String),
}

impl Normalized {
    pub fn into_string(self) -> String {
        match self {
            Normalized::Canonical(value) | Normalized::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }
}

/// First year that a two-digit year is read as belonging to the 1900s
const CENTURY_PIVOT: i32 = 2069;

/// Parse a source timestamp and render it in canonical form
///
/// Two-digit years 00-68 are 20xx and 69-99 are 19xx.
pub fn parse_timestamp(raw: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDateTime::parse_from_str(raw.trim(), SOURCE_TIMESTAMP_FORMAT)?;
    let parsed = if parsed.year() >= CENTURY_PIVOT {
        parsed.with_year(parsed.year() - 100).unwrap_or(parsed)
    } else {
        parsed
    };
    Ok(parsed.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
}

/// Normalize a timestamp, passing unparseable input through with a warning
pub fn normalize_timestamp(raw: &str) -> Normalized {
    match parse_timestamp(raw) {
        Ok(canonical) => Normalized::Canonical(canonical),
        Err(e) => {
            warn!("Unparseable timestamp {:?} kept as-is: {}", raw, e);
            Normalized::Fallback(raw.to_string())
        }
    }
}

//! Date values and permissive date coercion.
//!
//! Calendar exports do not always carry well-formed date properties. A
//! [`DateValue`] is whatever the parser could recover for a date property:
//! either a typed value the iCalendar library understood, or the raw
//! property text. [`coerce_date`] turns any of these into a calendar date.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// First `YYYYMMDD` run anywhere in a string.
static YYYYMMDD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})").expect("Invalid YYYYMMDD regex"));

/// A date property value as recovered from a calendar export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DateValue {
    /// A date without time (`VALUE=DATE`).
    Date(NaiveDate),
    /// A floating or TZID-qualified date-time, wall clock as written.
    DateTime(NaiveDateTime),
    /// A UTC date-time (`Z` suffix).
    Utc(DateTime<Utc>),
    /// Raw property text the parser could not type.
    Text(String),
}

impl DateValue {
    /// Creates a text value from raw property content.
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    /// Returns the calendar date for typed values.
    ///
    /// `Text` values return `None`; they need [`coerce_date`].
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::DateTime(dt) => Some(dt.date()),
            Self::Utc(dt) => Some(dt.date_naive()),
            Self::Text(_) => None,
        }
    }

    /// Returns true if the parser produced a typed value.
    pub fn is_typed(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%S")),
            Self::Utc(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%SZ")),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

/// Coerces a date property into a calendar date.
///
/// Fallback order, first success wins:
/// 1. typed values convert directly
/// 2. the first `YYYYMMDD` digit run in the stringified value, ignoring any
///    time or timezone suffix
/// 3. absence
///
/// Any eight consecutive digits are read as a date. A run that is not a real
/// calendar date (month 13, February 30) yields `None` rather than rolling
/// over into a neighbouring month.
pub fn coerce_date(value: Option<&DateValue>) -> Option<NaiveDate> {
    let value = value?;

    if let Some(date) = value.to_date() {
        return Some(date);
    }

    extract_yyyymmdd(&value.to_string())
}

/// Finds the first `YYYYMMDD` run in `text` and builds a date from it.
pub fn extract_yyyymmdd(text: &str) -> Option<NaiveDate> {
    let caps = YYYYMMDD_REGEX.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

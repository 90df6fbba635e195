//! Schedule items and course-code extraction.
//!
//! A [`ScheduleItem`] is the planning-level view of one calendar entry: a
//! title, the day it falls on, the course it belongs to and a short
//! description. Items serialize with the field names the planner prompt
//! expects (`title`, `date`, `courseCode`, `desc`).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Course codes: three uppercase letters followed by four digits.
static COURSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{3}[0-9]{4}").expect("Invalid course code regex"));

/// Title used when an entry has no summary.
pub const UNTITLED: &str = "(Untitled)";

/// Maximum description length, in characters.
pub const DESCRIPTION_LIMIT: usize = 50;

/// Returns the first course code in `title`, if any.
///
/// Matching is case-sensitive and ignores word boundaries, so `"XCSI21015"`
/// yields `"CSI2101"`.
pub fn extract_course_code(title: &str) -> Option<&str> {
    COURSE_CODE_REGEX.find(title).map(|m| m.as_str())
}

/// Truncates `text` to at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// One normalized schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Entry title, never empty.
    pub title: String,
    /// Day of the entry, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Course code found in the title or supplied during review.
    pub course_code: Option<String>,
    /// Description, at most [`DESCRIPTION_LIMIT`] characters.
    pub desc: String,
}

impl ScheduleItem {
    /// Builds an item from raw parts.
    ///
    /// Blank titles become [`UNTITLED`], the course code is extracted from the
    /// title and the description is truncated.
    pub fn new(title: Option<&str>, date: NaiveDate, description: Option<&str>) -> Self {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED)
            .to_string();
        let course_code = extract_course_code(&title).map(str::to_string);
        let desc = truncate_chars(description.unwrap_or_default(), DESCRIPTION_LIMIT);

        Self {
            title,
            date,
            course_code,
            desc,
        }
    }

    /// Returns the date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns true if the item still needs a course code from the user.
    pub fn needs_review(&self) -> bool {
        self.course_code.is_none()
    }

    /// Applies a user-supplied course code. Blank input clears it.
    pub fn set_course_code(&mut self, code: &str) {
        let code = code.trim();
        self.course_code = if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        };
    }
}

/// Sorts items ascending by date, keeping feed order for equal dates.
pub fn sort_by_date(items: &mut [ScheduleItem]) {
    items.sort_by(|a, b| a.date.cmp(&b.date));
}

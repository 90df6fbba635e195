//! iCalendar adapter.
//!
//! Wraps the `icalendar` component tree behind [`CalendarDocument`] and
//! [`CalendarEvent`], so the rest of the crate only sees the handful of
//! properties schedule ingestion needs.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, EventLike,
};
use thiserror::Error;
use tracing::{debug, warn};

use campusnavi_core::DateValue;

/// The calendar payload could not be turned into a component tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse calendar data: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Returns true if `body` is an HTML page rather than calendar data.
///
/// Login redirects of the export endpoint land on an HTML page; the body
/// then starts with markup or carries a doctype somewhere near the top.
pub fn looks_like_html(body: &str) -> bool {
    let trimmed = body.trim_start();
    trimmed.starts_with('<') || body.to_ascii_lowercase().contains("<!doctype html")
}

/// Properties of one calendar entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventProperties {
    pub uid: Option<String>,
    pub start_time: Option<DateValue>,
    pub due_time: Option<DateValue>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// One entry of a [`CalendarDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    /// A `VEVENT` component.
    Event(EventProperties),
    /// A `VTODO` component.
    Task(EventProperties),
}

impl CalendarEvent {
    pub fn properties(&self) -> &EventProperties {
        match self {
            Self::Event(props) | Self::Task(props) => props,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.properties().uid.as_deref()
    }

    pub fn start_time(&self) -> Option<&DateValue> {
        self.properties().start_time.as_ref()
    }

    pub fn due_time(&self) -> Option<&DateValue> {
        self.properties().due_time.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.properties().summary.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.properties().description.as_deref()
    }

    /// Returns true for `VTODO` entries.
    pub fn is_task(&self) -> bool {
        matches!(self, Self::Task(_))
    }
}

/// A parsed calendar export, events in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDocument {
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// Builds a document directly from events.
    pub fn from_events(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    /// Parses iCalendar text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text is not a `VCALENDAR` or the
    /// component tree cannot be built.
    pub fn parse(ics: &str) -> Result<Self, ParseError> {
        let trimmed = ics.trim_start_matches('\u{feff}').trim();
        if !trimmed
            .get(..15)
            .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"))
        {
            return Err(ParseError::new("payload does not start with BEGIN:VCALENDAR"));
        }

        let calendar = trimmed.parse::<Calendar>().map_err(|e| {
            warn!(error = %e, "Failed to parse ICS content");
            ParseError::new(e)
        })?;

        let events = calendar
            .iter()
            .filter_map(|component| match component {
                CalendarComponent::Event(event) => Some(CalendarEvent::Event(EventProperties {
                    uid: event.get_uid().map(str::to_string),
                    start_time: date_property(event.get_start(), event.property_value("DTSTART")),
                    due_time: event.property_value("DUE").map(parse_date_text),
                    summary: event.get_summary().map(str::to_string),
                    description: event.get_description().map(str::to_string),
                })),
                CalendarComponent::Todo(todo) => Some(CalendarEvent::Task(EventProperties {
                    uid: todo.get_uid().map(str::to_string),
                    start_time: todo.property_value("DTSTART").map(parse_date_text),
                    due_time: todo.property_value("DUE").map(parse_date_text),
                    summary: todo.get_summary().map(str::to_string),
                    description: todo.get_description().map(str::to_string),
                })),
                _ => None,
            })
            .inspect(|event| {
                debug!(
                    uid = ?event.uid(),
                    summary = ?event.summary(),
                    start = ?event.start_time(),
                    due = ?event.due_time(),
                    "Parsed calendar entry"
                );
            })
            .collect();

        Ok(Self { events })
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Prefers the library's typed value and falls back to the raw text.
fn date_property(typed: Option<DatePerhapsTime>, raw: Option<&str>) -> Option<DateValue> {
    match typed {
        Some(dt) => Some(convert_date_time(dt)),
        None => raw.map(DateValue::text),
    }
}

/// Converts icalendar `DatePerhapsTime` to a [`DateValue`].
fn convert_date_time(dt: DatePerhapsTime) -> DateValue {
    match dt {
        DatePerhapsTime::Date(date) => DateValue::Date(date),
        DatePerhapsTime::DateTime(cdt) => match cdt {
            CalendarDateTime::Utc(dt) => DateValue::Utc(dt),
            CalendarDateTime::Floating(naive) => DateValue::DateTime(naive),
            CalendarDateTime::WithTimezone { date_time, tzid: _ } => {
                DateValue::DateTime(date_time)
            }
        },
    }
}

/// Types a raw iCalendar date string when it is well-formed.
///
/// Used for properties the library has no typed accessor for on the given
/// component (`DUE` on events, date properties on tasks).
///
/// Handles `20250205T100000Z`, `20250205T100000` and `20250205`; anything
/// else is kept as text.
fn parse_date_text(raw: &str) -> DateValue {
    let s = raw.trim();

    if s.len() == 8
        && s.chars().all(|c| c.is_ascii_digit())
        && let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return DateValue::Date(date);
    }

    if let Some(utc) = s.strip_suffix('Z')
        && let Ok(dt) = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
    {
        return DateValue::Utc(Utc.from_utc_datetime(&dt));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S") {
        return DateValue::DateTime(dt);
    }

    DateValue::text(raw)
}

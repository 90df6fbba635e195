//! CalendarEvent to ScheduleItem conversion.
//!
//! The normalization process:
//! 1. Picks the start time, falling back to the due time
//! 2. Coerces it into a calendar date (entries without one are dropped)
//! 3. Builds the [`ScheduleItem`] (title placeholder, course code, short description)

use tracing::debug;

use campusnavi_core::{ScheduleItem, coerce_date, sort_by_date};

use crate::calendar::{CalendarDocument, CalendarEvent};

/// Converts one calendar entry into a schedule item.
///
/// Returns `None` when no date can be recovered from either `DTSTART` or
/// `DUE`. When both are present `DTSTART` wins.
pub fn normalize_event(event: &CalendarEvent) -> Option<ScheduleItem> {
    let date_value = event.start_time().or_else(|| event.due_time());

    let Some(date) = coerce_date(date_value) else {
        debug!(
            uid = ?event.uid(),
            summary = ?event.summary(),
            value = ?date_value,
            "Dropping entry without a usable date"
        );
        return None;
    };

    Some(ScheduleItem::new(event.summary(), date, event.description()))
}

/// Normalizes every entry of `document`, dropping unusable ones, sorted by date.
pub fn normalize_events(document: &CalendarDocument) -> Vec<ScheduleItem> {
    let mut items: Vec<ScheduleItem> = document.events().iter().filter_map(normalize_event).collect();
    sort_by_date(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventProperties;
    use campusnavi_core::{DateValue, UNTITLED};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: Option<DateValue>, due: Option<DateValue>, summary: &str) -> CalendarEvent {
        CalendarEvent::Event(EventProperties {
            uid: Some(format!("{summary}@test")),
            start_time: start,
            due_time: due,
            summary: Some(summary.to_string()),
            description: None,
        })
    }

    mod single_event {
        use super::*;

        #[test]
        fn uses_start_time() {
            let raw = event(Some(DateValue::Date(date(2025, 3, 4))), None, "CSI2101 Quiz");
            let item = normalize_event(&raw).unwrap();

            assert_eq!(item.title, "CSI2101 Quiz");
            assert_eq!(item.date, date(2025, 3, 4));
            assert_eq!(item.course_code.as_deref(), Some("CSI2101"));
            assert_eq!(item.desc, "");
        }

        #[test]
        fn falls_back_to_due_time() {
            let raw = event(None, Some(DateValue::text("20250310T235900")), "Essay");
            assert_eq!(normalize_event(&raw).unwrap().date, date(2025, 3, 10));
        }

        #[test]
        fn start_wins_over_due() {
            let raw = event(
                Some(DateValue::Date(date(2025, 3, 1))),
                Some(DateValue::Date(date(2025, 3, 9))),
                "Project",
            );
            assert_eq!(normalize_event(&raw).unwrap().date, date(2025, 3, 1));
        }

        #[test]
        fn malformed_start_does_not_fall_back_to_due() {
            let raw = event(
                Some(DateValue::text("TBD")),
                Some(DateValue::Date(date(2025, 3, 9))),
                "Project",
            );
            assert!(normalize_event(&raw).is_none());
        }

        #[test]
        fn recovers_date_from_malformed_text() {
            let raw = event(Some(DateValue::text("20251130T1500")), None, "Lab");
            assert_eq!(normalize_event(&raw).unwrap().date, date(2025, 11, 30));
        }

        #[test]
        fn no_date_is_unusable() {
            assert!(normalize_event(&event(None, None, "Floating")).is_none());
            assert!(normalize_event(&event(Some(DateValue::text("TBD")), None, "TBD")).is_none());
        }

        #[test]
        fn missing_summary_uses_placeholder() {
            let raw = CalendarEvent::Task(EventProperties {
                due_time: Some(DateValue::Date(date(2025, 1, 2))),
                ..EventProperties::default()
            });
            let item = normalize_event(&raw).unwrap();
            assert_eq!(item.title, UNTITLED);
            assert!(item.course_code.is_none());
        }

        #[test]
        fn truncates_description() {
            let raw = CalendarEvent::Event(EventProperties {
                start_time: Some(DateValue::Date(date(2025, 1, 2))),
                summary: Some("Reading".into()),
                description: Some("x".repeat(120)),
                ..EventProperties::default()
            });
            assert_eq!(normalize_event(&raw).unwrap().desc.len(), 50);
        }

        #[test]
        fn is_idempotent() {
            let raw = event(
                Some(DateValue::Utc(Utc.with_ymd_and_hms(2025, 11, 30, 15, 0, 0).unwrap())),
                None,
                "YCE1001 Reflection",
            );
            assert_eq!(normalize_event(&raw), normalize_event(&raw));
        }
    }

    mod document {
        use super::*;

        #[test]
        fn drops_unusable_and_sorts() {
            let doc = CalendarDocument::from_events(vec![
                event(Some(DateValue::Date(date(2025, 5, 3))), None, "third"),
                event(None, None, "no date"),
                event(Some(DateValue::Date(date(2025, 5, 1))), None, "first"),
                event(None, Some(DateValue::text("20250502")), "second (due only)"),
                event(Some(DateValue::Date(date(2025, 5, 4))), None, "fourth"),
            ]);

            let items = normalize_events(&doc);
            let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, vec!["first", "second (due only)", "third", "fourth"]);
            assert!(items.windows(2).all(|w| w[0].date <= w[1].date));
        }

        #[test]
        fn empty_document() {
            assert!(normalize_events(&CalendarDocument::default()).is_empty());
        }
    }
}

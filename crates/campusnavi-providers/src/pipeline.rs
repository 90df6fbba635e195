//! Schedule pipeline: credential → export fetch → parse → normalize → sort.

use std::sync::Arc;

use tracing::{debug, info, warn};

use campusnavi_core::ScheduleItem;

use crate::calendar::{CalendarDocument, looks_like_html};
use crate::credential::CredentialStore;
use crate::error::{ScheduleError, ScheduleResult};
use crate::fetcher::ExportFetcher;
use crate::normalize::normalize_events;

/// Fetches and normalizes the linked account's schedule.
///
/// The pipeline reads the credential store but never writes to it. Clearing
/// a stale credential after [`ScheduleError::AuthExpired`] is up to the
/// caller.
pub struct SchedulePipeline {
    store: Arc<dyn CredentialStore>,
    fetcher: Arc<dyn ExportFetcher>,
}

impl SchedulePipeline {
    pub fn new(store: Arc<dyn CredentialStore>, fetcher: Arc<dyn ExportFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Runs one ingestion.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::NotLinked`] without a stored credential
    /// - [`ScheduleError::FetchFailed`] / [`ScheduleError::Transport`] from the fetch
    /// - [`ScheduleError::AuthExpired`] when the body is an HTML page
    /// - [`ScheduleError::UnparsableData`] when the body is not calendar data
    /// - [`ScheduleError::Storage`] when the store cannot be read
    pub async fn fetch_schedule(&self) -> ScheduleResult<Vec<ScheduleItem>> {
        let credential = self.store.get()?.ok_or(ScheduleError::NotLinked)?;

        debug!(
            fetcher = self.fetcher.name(),
            user_id = %credential.user_id(),
            "Requesting calendar export"
        );

        let body = self.fetcher.fetch_export(&credential).await?;

        if looks_like_html(&body) {
            warn!(
                fetcher = self.fetcher.name(),
                "Export returned an HTML page, credential looks expired"
            );
            return Err(ScheduleError::AuthExpired);
        }

        info!(bytes = body.len(), "Received calendar export");

        let document = CalendarDocument::parse(&body)?;
        let items = normalize_events(&document);

        info!(
            entries = document.len(),
            items = items.len(),
            "Normalized calendar export"
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use crate::credential::{Credential, MemoryCredentialStore};
    use crate::error::FetchError;
    use crate::fetcher::BoxFuture;

    /// Replies with a fixed result and counts calls.
    struct StubFetcher {
        reply: Result<String, FetchError>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn body(body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(err: FetchError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ExportFetcher for StubFetcher {
        fn name(&self) -> &str {
            "stub"
        }

        fn fetch_export<'a>(
            &'a self,
            _credential: &'a Credential,
        ) -> BoxFuture<'a, Result<String, FetchError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.clone();
            Box::pin(async move { reply })
        }
    }

    fn linked_store() -> Arc<MemoryCredentialStore> {
        Arc::new(MemoryCredentialStore::with_credential(
            Credential::new("12345", "token").unwrap(),
        ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:-//Moodle Pty Ltd//NONSGML Moodle Version 2022112800//EN\r\n\
        BEGIN:VEVENT\r\n\
        UID:3@ys.learnus.org\r\n\
        DTSTART:20251205T090000Z\r\n\
        SUMMARY:EEE3313 Final project\r\n\
        DESCRIPTION:Team presentation\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:1@ys.learnus.org\r\n\
        DTSTART:20251130T150000Z\r\n\
        SUMMARY:CSI2101 Midterm\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:2@ys.learnus.org\r\n\
        DUE:20251201T235900\r\n\
        SUMMARY:Weekly reflection\r\n\
        END:VEVENT\r\n\
        BEGIN:VEVENT\r\n\
        UID:4@ys.learnus.org\r\n\
        DTSTART:TBD\r\n\
        SUMMARY:YCE1001 Field trip\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    #[tokio::test]
    async fn returns_sorted_items_and_drops_unparsable_dates() {
        let pipeline = SchedulePipeline::new(linked_store(), StubFetcher::body(FEED));
        let items = pipeline.fetch_schedule().await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "CSI2101 Midterm");
        assert_eq!(items[0].date, date(2025, 11, 30));
        assert_eq!(items[1].title, "Weekly reflection");
        assert_eq!(items[1].date, date(2025, 12, 1));
        assert!(items[1].course_code.is_none());
        assert_eq!(items[2].course_code.as_deref(), Some("EEE3313"));
        assert_eq!(items[2].desc, "Team presentation");
        assert!(!items.iter().any(|i| i.title.contains("Field trip")));
    }

    #[tokio::test]
    async fn not_linked_skips_fetch() {
        let fetcher = StubFetcher::body(FEED);
        let pipeline =
            SchedulePipeline::new(Arc::new(MemoryCredentialStore::new()), fetcher.clone());

        let err = pipeline.fetch_schedule().await.unwrap_err();
        assert!(matches!(err, ScheduleError::NotLinked));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn http_error_is_fetch_failed() {
        let pipeline = SchedulePipeline::new(
            linked_store(),
            StubFetcher::failing(FetchError::Status { status: 500 }),
        );

        let err = pipeline.fetch_schedule().await.unwrap_err();
        assert!(matches!(err, ScheduleError::FetchFailed { status: 500 }));
    }

    #[tokio::test]
    async fn transport_error_is_surfaced() {
        let pipeline = SchedulePipeline::new(
            linked_store(),
            StubFetcher::failing(FetchError::Transport("timed out".into())),
        );

        let err = pipeline.fetch_schedule().await.unwrap_err();
        assert!(matches!(err, ScheduleError::Transport(_)));
    }

    #[tokio::test]
    async fn html_login_page_is_auth_expired() {
        let pipeline = SchedulePipeline::new(
            linked_store(),
            StubFetcher::body("<!DOCTYPE html>\n<html><body>Log in to LearnUs</body></html>"),
        );

        let err = pipeline.fetch_schedule().await.unwrap_err();
        assert!(matches!(err, ScheduleError::AuthExpired));
    }

    #[tokio::test]
    async fn garbage_is_unparsable() {
        let pipeline =
            SchedulePipeline::new(linked_store(), StubFetcher::body("Service unavailable"));

        let err = pipeline.fetch_schedule().await.unwrap_err();
        assert!(matches!(err, ScheduleError::UnparsableData(_)));
    }

    #[tokio::test]
    async fn never_touches_the_store() {
        let store = linked_store();
        let pipeline =
            SchedulePipeline::new(store.clone(), StubFetcher::body("<html>expired</html>"));

        assert!(pipeline.fetch_schedule().await.is_err());
        assert!(store.get().unwrap().is_some());
    }

    #[tokio::test]
    async fn empty_calendar_is_empty_schedule() {
        let pipeline = SchedulePipeline::new(
            linked_store(),
            StubFetcher::body("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n"),
        );

        assert!(pipeline.fetch_schedule().await.unwrap().is_empty());
    }
}

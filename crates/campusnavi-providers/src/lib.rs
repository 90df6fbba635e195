//! Schedule ingestion for campusnavi.
//!
//! This crate turns a linked LMS account into a sorted list of
//! [`ScheduleItem`](campusnavi_core::ScheduleItem)s:
//!
//! - [`CredentialStore`] - Where the linked `userid`/`authtoken` pair lives
//! - [`ExportFetcher`] - Retrieves the raw calendar export for a credential
//! - [`CalendarDocument`] - Parsed iCalendar export
//! - [`normalize_event`] - Converts one calendar entry into a schedule item
//! - [`SchedulePipeline`] - Ties the above together
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │ CredentialStore  │────▶│  ExportFetcher   │  (LearnUsClient)
//! └──────────────────┘     └────────┬─────────┘
//!                                   │ text/calendar body
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │ CalendarDocument │
//!                          └────────┬─────────┘
//!                                   │ normalize_events()
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │ Vec<ScheduleItem>│
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use campusnavi_providers::{FileCredentialStore, SchedulePipeline};
//! use campusnavi_providers::learnus::{LearnUsClient, LearnUsConfig};
//!
//! let store = Arc::new(FileCredentialStore::new("credential.json"));
//! let client = Arc::new(LearnUsClient::new(LearnUsConfig::default())?);
//! let items = SchedulePipeline::new(store, client).fetch_schedule().await?;
//! ```

pub mod calendar;
pub mod credential;
pub mod error;
pub mod fetcher;
#[cfg(feature = "learnus")]
pub mod learnus;
pub mod normalize;
pub mod pipeline;

pub use calendar::{CalendarDocument, CalendarEvent, EventProperties, ParseError, looks_like_html};
pub use credential::{
    Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore, link_account,
    unlink_account,
};
pub use error::{FetchError, ScheduleError, ScheduleResult};
pub use fetcher::{BoxFuture, ExportFetcher};
pub use normalize::{normalize_event, normalize_events};
pub use pipeline::SchedulePipeline;

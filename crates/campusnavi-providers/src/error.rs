//! Error types for schedule ingestion.
//!
//! Every failure is local to one pipeline invocation. Entries whose dates
//! cannot be recovered are not errors; they are dropped by the normalizer.

use thiserror::Error;

use crate::calendar::ParseError;

/// Why a fetch through an [`ExportFetcher`](crate::fetcher::ExportFetcher)
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// No response at all: connection, TLS, timeout, body read.
    #[error("request failed: {0}")]
    Transport(String),
}

/// A failed schedule operation.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No credential has been linked yet.
    #[error("no calendar account is linked")]
    NotLinked,

    /// The export URL lacks `userid` or `authtoken`.
    #[error("invalid calendar export URL: {0}")]
    InvalidLinkUrl(String),

    /// The export endpoint answered with a non-success status.
    #[error("calendar fetch failed with HTTP {status}")]
    FetchFailed { status: u16 },

    /// The export endpoint could not be reached.
    #[error("calendar fetch failed: {0}")]
    Transport(String),

    /// The export returned an HTML login page instead of calendar data.
    #[error("calendar authentication has expired, link the account again")]
    AuthExpired,

    /// The export payload is not valid calendar data.
    #[error("could not interpret the calendar data")]
    UnparsableData(#[source] ParseError),

    /// The credential store failed.
    #[error("credential storage error: {0}")]
    Storage(String),
}

impl ScheduleError {
    /// Stable machine-readable name of the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotLinked => "not_linked",
            Self::InvalidLinkUrl(_) => "invalid_link_url",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::Transport(_) => "transport",
            Self::AuthExpired => "auth_expired",
            Self::UnparsableData(_) => "unparsable_data",
            Self::Storage(_) => "storage",
        }
    }

    /// Returns true if the caller should offer to unlink and link again.
    pub fn suggests_relink(&self) -> bool {
        matches!(self, Self::AuthExpired | Self::FetchFailed { .. })
    }
}

impl From<FetchError> for ScheduleError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status } => Self::FetchFailed { status },
            FetchError::Transport(message) => Self::Transport(message),
        }
    }
}

impl From<ParseError> for ScheduleError {
    fn from(err: ParseError) -> Self {
        Self::UnparsableData(err)
    }
}

/// A specialized Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

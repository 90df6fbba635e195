//! The authenticated export fetch seam.
//!
//! The pipeline never talks HTTP itself. It hands the credential to an
//! [`ExportFetcher`], which returns the raw export body. Whether the
//! implementation follows redirects is its own business; the pipeline
//! inspects the body regardless.

use std::future::Future;
use std::pin::Pin;

use crate::credential::Credential;
use crate::error::FetchError;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches the calendar export for a credential.
pub trait ExportFetcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns the export body.
    ///
    /// # Errors
    ///
    /// [`FetchError::Status`] on a non-success response,
    /// [`FetchError::Transport`] when no response was received.
    fn fetch_export<'a>(
        &'a self,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<String, FetchError>>;
}

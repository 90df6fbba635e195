//! HTTP client for the LearnUs calendar export.

use reqwest::Client;
use tracing::{debug, trace, warn};

use crate::credential::Credential;
use crate::error::{FetchError, ScheduleError, ScheduleResult};
use crate::fetcher::{BoxFuture, ExportFetcher};

use super::config::LearnUsConfig;

/// Fetches calendar exports straight from the LearnUs endpoint.
///
/// Redirects are followed; a login redirect therefore shows up as a `200`
/// with an HTML body, which the pipeline turns into
/// [`ScheduleError::AuthExpired`].
pub struct LearnUsClient {
    client: Client,
    config: LearnUsConfig,
}

impl LearnUsClient {
    pub fn new(config: LearnUsConfig) -> ScheduleResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ScheduleError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LearnUsConfig {
        &self.config
    }

    async fn get(&self, credential: &Credential) -> Result<String, FetchError> {
        let url = self
            .config
            .request_url(credential.user_id(), credential.auth_token());

        trace!(endpoint = %self.config.export_url, user_id = %credential.user_id(), "Sending export request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        debug!(status = %status, final_host = ?response.url().host_str(), "Received export response");

        if !status.is_success() {
            warn!(status = %status, "Export endpoint returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read response: {}", e.without_url())))
    }
}

impl ExportFetcher for LearnUsClient {
    fn name(&self) -> &str {
        "learnus"
    }

    fn fetch_export<'a>(
        &'a self,
        credential: &'a Credential,
    ) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(self.get(credential))
    }
}

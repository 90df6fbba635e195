//! LearnUs export client configuration.

use std::time::Duration;

use url::Url;

/// Configuration for [`LearnUsClient`](super::LearnUsClient).
#[derive(Debug, Clone)]
pub struct LearnUsConfig {
    /// Export endpoint, without query parameters.
    pub export_url: Url,

    /// Value of the `preset_what` parameter.
    pub preset_what: String,

    /// Value of the `preset_time` parameter.
    pub preset_time: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string. The endpoint serves a login page to unknown agents.
    pub user_agent: String,
}

impl LearnUsConfig {
    pub const DEFAULT_EXPORT_URL: &'static str =
        "https://ys.learnus.org/calendar/export_execute.php";

    pub const DEFAULT_PRESET_WHAT: &'static str = "all";

    pub const DEFAULT_PRESET_TIME: &'static str = "recentupcoming";

    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// Creates a configuration for the given export endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(export_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(export_url.as_ref())?;
        Ok(Self {
            export_url: parsed,
            preset_what: Self::DEFAULT_PRESET_WHAT.to_string(),
            preset_time: Self::DEFAULT_PRESET_TIME.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_presets(mut self, what: impl Into<String>, time: impl Into<String>) -> Self {
        self.preset_what = what.into();
        self.preset_time = time.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the export request URL for one account.
    pub fn request_url(&self, user_id: &str, auth_token: &str) -> Url {
        let mut url = self.export_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("userid", user_id)
            .append_pair("authtoken", auth_token)
            .append_pair("preset_what", &self.preset_what)
            .append_pair("preset_time", &self.preset_time);
        url
    }
}

impl Default for LearnUsConfig {
    fn default() -> Self {
        // The constant is a valid absolute URL.
        Self::new(Self::DEFAULT_EXPORT_URL).expect("default export URL should parse")
    }
}

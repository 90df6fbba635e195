//! Account linking commands.

use std::io::Write;

use tracing::info;

use campusnavi_providers::{CredentialStore, SchedulePipeline, link_account, unlink_account};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Stores the credential from `url`, then fetches once to confirm it works.
pub async fn link(url: &str, config: &ClientConfig) -> ClientResult<()> {
    let store = super::credential_store(config);
    let pipeline = super::pipeline(config, store.clone())?;
    link_with(store.as_ref(), &pipeline, url, &mut std::io::stdout()).await
}

/// Forgets the linked credential.
pub fn unlink(config: &ClientConfig) -> ClientResult<()> {
    let store = super::credential_store(config);
    unlink_with(store.as_ref(), &mut std::io::stdout())
}

pub async fn link_with<W: Write>(
    store: &dyn CredentialStore,
    pipeline: &SchedulePipeline,
    url: &str,
    out: &mut W,
) -> ClientResult<()> {
    let url = secret::resolve(url).map_err(ClientError::Config)?;
    let credential = link_account(store, &url)?;
    writeln!(out, "Linked account {}.", credential.user_id())?;

    let items = pipeline.fetch_schedule().await?;
    info!(items = items.len(), "Verified linked account");
    writeln!(out, "Found {} scheduled item(s).", items.len())?;
    Ok(())
}

pub fn unlink_with<W: Write>(store: &dyn CredentialStore, out: &mut W) -> ClientResult<()> {
    unlink_account(store)?;
    writeln!(out, "Account unlinked.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use campusnavi_providers::{
        BoxFuture, Credential, ExportFetcher, FetchError, MemoryCredentialStore, ScheduleError,
    };

    struct FixedFetcher(&'static str);

    impl ExportFetcher for FixedFetcher {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_export<'a>(
            &'a self,
            _credential: &'a Credential,
        ) -> BoxFuture<'a, Result<String, FetchError>> {
            let body = self.0.to_string();
            Box::pin(async move { Ok(body) })
        }
    }

    const URL: &str =
        "https://ys.learnus.org/calendar/export_execute.php?userid=12345&authtoken=abc&preset_what=all";

    const FEED: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\n\
        BEGIN:VEVENT\r\nUID:1\r\nDTSTART:20250301T090000Z\r\nSUMMARY:CSI2101 Quiz\r\nEND:VEVENT\r\n\
        END:VCALENDAR\r\n";

    fn setup(body: &'static str) -> (Arc<MemoryCredentialStore>, SchedulePipeline) {
        let store = Arc::new(MemoryCredentialStore::new());
        let pipeline = SchedulePipeline::new(store.clone(), Arc::new(FixedFetcher(body)));
        (store, pipeline)
    }

    #[tokio::test]
    async fn link_stores_credential_and_verifies() {
        let (store, pipeline) = setup(FEED);
        let mut out = Vec::new();

        link_with(store.as_ref(), &pipeline, URL, &mut out).await.unwrap();

        let stored = store.get().unwrap().unwrap();
        assert_eq!(stored.user_id(), "12345");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Linked account 12345.\nFound 1 scheduled item(s).\n"
        );
    }

    #[tokio::test]
    async fn link_rejects_url_without_token() {
        let (store, pipeline) = setup(FEED);
        let err = link_with(
            store.as_ref(),
            &pipeline,
            "https://ys.learnus.org/calendar/export_execute.php?userid=12345",
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ClientError::Schedule(ScheduleError::InvalidLinkUrl(_))));
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_verification_keeps_credential() {
        let (store, pipeline) = setup("<html>login</html>");
        let err = link_with(store.as_ref(), &pipeline, URL, &mut Vec::new())
            .await
            .unwrap_err();

        assert!(err.suggests_relink());
        assert!(store.get().unwrap().is_some());
    }

    #[tokio::test]
    async fn link_resolves_env_reference() {
        unsafe {
            std::env::set_var("_CAMPUSNAVI_TEST_LINK_URL", URL);
        }
        let (store, pipeline) = setup(FEED);
        link_with(store.as_ref(), &pipeline, "env::_CAMPUSNAVI_TEST_LINK_URL", &mut Vec::new())
            .await
            .unwrap();
        unsafe {
            std::env::remove_var("_CAMPUSNAVI_TEST_LINK_URL");
        }

        assert_eq!(store.get().unwrap().unwrap().auth_token(), "abc");
    }

    #[test]
    fn unlink_clears_store() {
        let store = MemoryCredentialStore::with_credential(Credential::new("1", "t").unwrap());
        let mut out = Vec::new();

        unlink_with(&store, &mut out).unwrap();

        assert!(store.get().unwrap().is_none());
        assert_eq!(String::from_utf8(out).unwrap(), "Account unlinked.\n");
    }
}

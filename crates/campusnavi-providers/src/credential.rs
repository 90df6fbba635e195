//! Export credentials and their storage.
//!
//! A [`Credential`] is the `userid`/`authtoken` pair embedded in a calendar
//! export URL. Stores are injected into the pipeline; the pipeline only
//! reads from them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ScheduleError, ScheduleResult};

/// The identifiers needed to fetch a calendar export.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "userid")]
    user_id: String,
    #[serde(rename = "authtoken")]
    auth_token: String,
}

impl Credential {
    /// Creates a credential. Both parts must be non-empty.
    pub fn new(user_id: impl Into<String>, auth_token: impl Into<String>) -> ScheduleResult<Self> {
        let user_id = user_id.into();
        let auth_token = auth_token.into();
        if user_id.is_empty() || auth_token.is_empty() {
            return Err(ScheduleError::InvalidLinkUrl(
                "userid and authtoken must not be empty".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            auth_token,
        })
    }

    /// Extracts the credential from a calendar export URL.
    ///
    /// The URL must parse and carry non-empty `userid` and `authtoken` query
    /// parameters; nothing else about it is checked.
    pub fn from_export_url(export_url: &str) -> ScheduleResult<Self> {
        let url = Url::parse(export_url.trim())
            .map_err(|e| ScheduleError::InvalidLinkUrl(format!("not a URL: {e}")))?;

        let mut user_id = None;
        let mut auth_token = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "userid" if user_id.is_none() => user_id = Some(value.into_owned()),
                "authtoken" if auth_token.is_none() => auth_token = Some(value.into_owned()),
                _ => {}
            }
        }

        match (user_id, auth_token) {
            (Some(u), Some(t)) if !u.is_empty() && !t.is_empty() => Ok(Self {
                user_id: u,
                auth_token: t,
            }),
            _ => Err(ScheduleError::InvalidLinkUrl(
                "URL must contain userid and authtoken parameters".to_string(),
            )),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Persistence for the linked credential.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, if any.
    fn get(&self) -> ScheduleResult<Option<Credential>>;

    /// Replaces the stored credential.
    fn set(&self, credential: &Credential) -> ScheduleResult<()>;

    /// Removes the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> ScheduleResult<()>;
}

/// Validates `export_url` and stores its credential.
///
/// Nothing is stored when the URL is rejected.
pub fn link_account(store: &dyn CredentialStore, export_url: &str) -> ScheduleResult<Credential> {
    let credential = Credential::from_export_url(export_url)?;
    store.set(&credential)?;
    info!(user_id = %credential.user_id(), "Linked calendar account");
    Ok(credential)
}

/// Removes the linked credential.
pub fn unlink_account(store: &dyn CredentialStore) -> ScheduleResult<()> {
    store.clear()?;
    info!("Unlinked calendar account");
    Ok(())
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> ScheduleResult<Option<Credential>> {
        Ok(self
            .credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, credential: &Credential) -> ScheduleResult<()> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> ScheduleResult<()> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file store.
///
/// Writes go through a temporary file and a rename. On Unix the file is
/// readable by the owner only.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> ScheduleResult<Option<Credential>> {
        if !self.path.exists() {
            debug!("no credential file at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ScheduleError::Storage(format!("failed to read credential file: {e}"))
        })?;

        let credential: Credential = serde_json::from_str(&content).map_err(|e| {
            ScheduleError::Storage(format!("failed to parse credential file: {e}"))
        })?;

        if credential.user_id.is_empty() || credential.auth_token.is_empty() {
            return Err(ScheduleError::Storage(
                "credential file holds an empty userid or authtoken".to_string(),
            ));
        }

        Ok(Some(credential))
    }

    fn set(&self, credential: &Credential) -> ScheduleResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Storage(format!("failed to create credential directory: {e}"))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(credential).map_err(|e| {
            ScheduleError::Storage(format!("failed to serialize credential: {e}"))
        })?;

        fs::write(&temp_path, &content).map_err(|e| {
            ScheduleError::Storage(format!("failed to write credential file: {e}"))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600));
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            ScheduleError::Storage(format!("failed to rename credential file: {e}"))
        })?;

        debug!("saved credential to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> ScheduleResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ScheduleError::Storage(format!("failed to remove credential file: {e}"))
            })?;
            info!("cleared credential from {:?}", self.path);
        }
        Ok(())
    }
}

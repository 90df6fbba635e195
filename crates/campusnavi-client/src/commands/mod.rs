//! Subcommand implementations.

pub mod config;
pub mod link;
pub mod persona;
pub mod schedule;

use std::sync::Arc;

use campusnavi_providers::learnus::LearnUsClient;
use campusnavi_providers::{CredentialStore, FileCredentialStore, SchedulePipeline};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Opens the credential store named by the configuration.
pub fn credential_store(config: &ClientConfig) -> Arc<dyn CredentialStore> {
    Arc::new(FileCredentialStore::new(config.credential_path()))
}

/// Builds a pipeline backed by the LearnUs export client.
pub fn pipeline(
    config: &ClientConfig,
    store: Arc<dyn CredentialStore>,
) -> ClientResult<SchedulePipeline> {
    let learnus = config
        .export
        .to_learnus_config()
        .map_err(ClientError::Config)?;
    let client = LearnUsClient::new(learnus)?;
    Ok(SchedulePipeline::new(store, Arc::new(client)))
}

//! Configuration commands.

use std::io::Write;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dumps the effective configuration as TOML.
pub fn dump<W: Write>(config: &ClientConfig, out: &mut W) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    writeln!(out, "# config.toml ({})", ClientConfig::default_path().display())?;
    writeln!(out, "{}", toml_str)?;
    Ok(())
}

/// Checks that the export settings produce a usable client configuration.
pub fn validate<W: Write>(config: &ClientConfig, out: &mut W) -> ClientResult<()> {
    let learnus = config
        .export
        .to_learnus_config()
        .map_err(ClientError::Config)?;
    writeln!(out, "Export endpoint: {}", learnus.export_url)?;
    writeln!(out, "Credential file: {}", config.credential_path().display())?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Shows the configuration file path.
pub fn path<W: Write>(out: &mut W) -> ClientResult<()> {
    writeln!(out, "config: {}", ClientConfig::default_path().display())?;
    writeln!(out, "data: {}", ClientConfig::default_data_dir().display())?;
    Ok(())
}

//! Secret references for the export URL.
//!
//! The export URL embeds the account's auth token, so it can be passed to
//! `campusnavi link` indirectly:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - `pass::path/in/store` reads the first line of `pass show path/in/store`
//! - anything else is taken literally

use std::process::Command;

/// Where a secret value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource<'a> {
    Literal(&'a str),
    Env(&'a str),
    Pass(&'a str),
}

impl<'a> SecretSource<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else {
            Self::Literal(value)
        }
    }

    /// Reads the secret.
    pub fn resolve(&self) -> Result<String, String> {
        match *self {
            Self::Literal(value) => Ok(value.to_string()),
            Self::Env(var) => {
                std::env::var(var).map_err(|_| format!("environment variable `{var}` is not set"))
            }
            Self::Pass(path) => read_pass(path),
        }
    }
}

/// Resolves a value that may be a secret reference.
pub fn resolve(value: &str) -> Result<String, String> {
    SecretSource::parse(value).resolve()
}

fn read_pass(path: &str) -> Result<String, String> {
    let output = Command::new("pass")
        .args(["show", path])
        .output()
        .map_err(|e| format!("failed to run `pass show {path}`: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {path}` failed ({}): {}",
            output.status,
            stderr.trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .ok_or_else(|| format!("`pass show {path}` produced no output"))
}

//! Client error types.

use std::fmt;

use campusnavi_core::UnknownPersona;
use campusnavi_providers::ScheduleError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Linking or schedule ingestion failed.
    Schedule(ScheduleError),
    /// Unknown persona id.
    Persona(UnknownPersona),
    /// Output could not be produced.
    Output(String),
    /// IO error.
    Io(std::io::Error),
}

impl ClientError {
    /// Returns true if re-linking the account is the likely fix.
    pub fn suggests_relink(&self) -> bool {
        matches!(self, Self::Schedule(err) if err.suggests_relink())
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Schedule(err) => write!(f, "{}", err),
            Self::Persona(err) => write!(f, "{}", err),
            Self::Output(msg) => write!(f, "output error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schedule(err) => Some(err),
            Self::Persona(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ScheduleError> for ClientError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

impl From<UnknownPersona> for ClientError {
    fn from(err: UnknownPersona) -> Self {
        Self::Persona(err)
    }
}

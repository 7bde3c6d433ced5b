//! Error types for the orrery kernel.
//!
//! Only configuration and seeding can fail. Degenerate geometry during a tick
//! and comets leaving the visible area are handled in place and never surface
//! as errors.

use std::fmt;

/// Errors reported to the host at construction or (re)seed time.
#[derive(Debug)]
pub enum OrreryError {
    /// Two bodies in one simulation share a name.
    DuplicateName(String),
    /// A configuration value is out of its valid range.
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrreryError::DuplicateName(name) => {
                write!(f, "Duplicate body name '{}': body names must be unique", name)
            }
            OrreryError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            OrreryError::ConfigParse(e) => write!(f, "Failed to parse configuration: {}", e),
        }
    }
}

impl std::error::Error for OrreryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrreryError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OrreryError {
    fn from(e: serde_json::Error) -> Self {
        OrreryError::ConfigParse(e)
    }
}

pub type Result<T> = std::result::Result<T, OrreryError>;

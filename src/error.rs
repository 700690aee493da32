//! Settings error types.
//!
//! The simulation itself cannot fail; the only recoverable errors come from
//! loading user-supplied settings, which fall back to defaults on error.

use std::fmt;

/// Reasons a settings document is rejected
#[derive(Debug)]
pub enum SettingsError {
    /// The document is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),

    /// The settings file exists but could not be read.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// A numeric range has its lower bound above its upper bound, or is
    /// otherwise empty.
    EmptyRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A value is outside what the game can use.
    OutOfRange {
        /// Name of the setting (for logging).
        name: &'static str,
        value: f32,
        /// Human-readable description of the accepted range.
        allowed: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Io { path, source } => {
                write!(f, "could not read settings file '{}': {}", path, source)
            }
            SettingsError::EmptyRange { name, min, max } => write!(
                f,
                "setting range '{}' is empty: min {} is above max {}",
                name, min, max
            ),
            SettingsError::OutOfRange {
                name,
                value,
                allowed,
            } => write!(
                f,
                "setting '{}' = {} is outside allowed range {}",
                name, value, allowed
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `SettingsError` as the error type.
pub type SettingsResult<T> = Result<T, SettingsError>;

//! Unified error types for trailmap.
//!
//! The core has exactly one user-facing failure: an invalid profile at
//! generation time. Everything else (unknown users, unknown resources,
//! profiles that match nothing) resolves to an empty or false default.
//! The remaining variants cover the file-backed edges of the crate:
//! config, catalog and profile files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for trailmap operations.
#[derive(Error, Debug)]
pub enum TrailmapError {
    /// The profile cannot be turned into a learning path.
    #[error("invalid profile: {message}")]
    InvalidProfile { message: String },

    /// A catalog failed validation (duplicate ids, bad ratings).
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// I/O errors reading config, catalog or profile files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Internal state could not be accessed (poisoned lock).
    #[error("invalid state: {message}")]
    InvalidState { message: String },
}

/// A specialized Result type for trailmap operations.
pub type Result<T> = std::result::Result<T, TrailmapError>;

impl TrailmapError {
    /// Create an invalid profile error.
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            message: message.into(),
        }
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

impl From<io::Error> for TrailmapError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TrailmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

impl From<toml::de::Error> for TrailmapError {
    fn from(err: toml::de::Error) -> Self {
        Self::serde(err.to_string())
    }
}

/// Fail-open handling for results whose failure has a safe substitute.
///
/// Logs the error at `warn` and returns the substitute instead.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the trailmap CLI.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command failed (bad profile, unreadable file).
    pub const ERROR: i32 = 1;
}

//! Error types shared across the pipelines
//!
//! Only location acquisition ever surfaces an error screen. The other
//! variants cover the ambient plumbing around the pipelines (file reads,
//! configuration) and the preconditions of the tile download.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a one-shot position acquisition.
///
/// Maps 1:1 onto the host's geolocation fault codes; `Display` is the
/// message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location access denied by user")]
    PermissionDenied,
    #[error("Location information is unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("An unknown error occurred")]
    Unknown,
}

impl LocationError {
    /// Translate a numeric host fault code (1 = permission denied,
    /// 2 = position unavailable, 3 = timeout). Anything else is `Unknown`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }
}

/// Failure while turning a user-chosen file into a displayable preview.
///
/// Carries strings rather than source errors so it can travel inside
/// cloneable UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("Could not read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("{} is not a supported image: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Failure while loading or saving the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
    #[error("Config I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a tile download request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DownloadRejected {
    #[error("No position is known yet")]
    NoPosition,
    #[error("A download is already in progress")]
    InProgress,
}

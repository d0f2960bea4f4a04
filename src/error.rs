//! Error types for the countdown engine and the settings store

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the countdown engine and the command surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `start` was called while a cycle is active
    #[error("AlreadyRunning")]
    AlreadyRunning,

    /// Interval is not a positive number of minutes, or outside configured bounds
    #[error("Interval must be between {min} and {max} minutes, got {value}")]
    InvalidInterval { value: i64, min: u64, max: u64 },

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Message must be at most {max} characters, got {len}")]
    MessageTooLong { len: usize, max: usize },

    /// The notification collaborator could not deliver the reminder
    #[error("Notification could not be delivered")]
    NotificationUnavailable,

    #[error("Failed to lock countdown state: {0}")]
    StateLock(String),
}

/// Failures while reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No user configuration directory available")]
    NoConfigDir,

    /// Update rejected before anything was written
    #[error("Invalid settings: {0}")]
    Invalid(#[from] EngineError),
}

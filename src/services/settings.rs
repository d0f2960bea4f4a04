//! Persisted user settings
//!
//! A flat JSON object in `settings.json`. Missing keys fall back to their
//! defaults and unknown keys are ignored, so older files keep loading.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{error, info, warn};

use super::Autostart;
use crate::{
    commands::{validate_message, IntervalBounds},
    error::SettingsError,
};

pub const DEFAULT_INTERVAL_MINUTES: u64 = 20;
pub const DEFAULT_MESSAGE: &str = "Time to rest your eyes! Look 20 feet away for 20 seconds.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub close_to_tray: bool,
    pub minimize_to_tray: bool,
    pub run_on_startup: bool,
    pub interval_minutes: u64,
    pub message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            close_to_tray: true,
            minimize_to_tray: true,
            run_on_startup: false,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Partial update; absent keys keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub close_to_tray: Option<bool>,
    pub minimize_to_tray: Option<bool>,
    pub run_on_startup: Option<bool>,
    pub interval_minutes: Option<u64>,
    pub message: Option<String>,
}

impl Settings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.close_to_tray {
            self.close_to_tray = v;
        }
        if let Some(v) = update.minimize_to_tray {
            self.minimize_to_tray = v;
        }
        if let Some(v) = update.run_on_startup {
            self.run_on_startup = v;
        }
        if let Some(v) = update.interval_minutes {
            self.interval_minutes = v;
        }
        if let Some(v) = update.message {
            self.message = v;
        }
    }
}

/// Settings file plus the autostart entry mirrored by `runOnStartup`
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    autostart: Autostart,
    /// Accepted `intervalMinutes` range, shared with the command surface
    bounds: IntervalBounds,
    /// Serializes read-merge-write updates
    write_lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>, autostart: Autostart, bounds: IntervalBounds) -> Self {
        Self {
            path: path.into(),
            autostart,
            bounds,
            write_lock: Mutex::new(()),
        }
    }

    /// `settings.json` under the user's configuration directory
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("blink-now").join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the settings file with defaults if it does not exist yet
    pub async fn initialize(&self) -> Result<(), SettingsError> {
        if fs::try_exists(&self.path).await.map_err(|e| self.io_error(e))? {
            return Ok(());
        }
        info!("Creating default settings at {}", self.path.display());
        self.save_all(&Settings::default()).await
    }

    /// Stored settings merged over the defaults, with the live autostart state.
    /// An unreadable file yields the defaults.
    pub async fn get_all(&self) -> Settings {
        let mut settings = match self.load().await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to read settings: {}", e);
                Settings::default()
            }
        };
        settings.run_on_startup = self.autostart.is_enabled().await;
        settings
    }

    pub async fn save_all(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json).await.map_err(|e| self.io_error(e))
    }

    /// Merge `update` into the stored settings and persist the result.
    /// The interval and message are checked like a start command; an invalid
    /// update leaves the file and the autostart entry untouched.
    pub async fn update(&self, mut update: SettingsUpdate) -> Result<Settings, SettingsError> {
        if let Some(minutes) = update.interval_minutes {
            self.bounds.check(i64::try_from(minutes).unwrap_or(i64::MAX))?;
        }
        if let Some(message) = update.message.as_mut() {
            *message = validate_message(message)?.to_string();
        }

        let _guard = self.write_lock.lock().await;

        let mut settings = self.get_all().await;
        if let Some(enabled) = update.run_on_startup {
            if let Err(e) = self.autostart.set(enabled).await {
                warn!("Failed to update autostart: {:#}", e);
            }
        }
        settings.apply(update);
        self.save_all(&settings).await?;

        info!("Settings updated");
        Ok(settings)
    }

    async fn load(&self) -> Result<Settings, SettingsError> {
        let data = fs::read_to_string(&self.path).await.map_err(|e| self.io_error(e))?;
        serde_json::from_str(&data).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::MAX_MESSAGE_CHARS, error::EngineError};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(
            dir.path().join("blink-now").join("settings.json"),
            Autostart::new(dir.path().join("autostart"), "/usr/bin/blink-now"),
            IntervalBounds::default(),
        )
    }

    #[tokio::test]
    async fn initialize_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.initialize().await.unwrap();
        assert_eq!(store.get_all().await, Settings::default());

        let mut custom = Settings::default();
        custom.interval_minutes = 45;
        store.save_all(&custom).await.unwrap();
        store.initialize().await.unwrap();
        assert_eq!(store.get_all().await.interval_minutes, 45);
    }

    #[tokio::test]
    async fn missing_keys_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"closeToTray": false, "theme": "dark"}"#).unwrap();

        let settings = store.get_all().await;

        assert!(!settings.close_to_tray);
        assert!(settings.minimize_to_tray);
        assert_eq!(settings.message, DEFAULT_MESSAGE);
    }

    #[tokio::test]
    async fn corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert_eq!(store.get_all().await, Settings::default());
    }

    #[tokio::test]
    async fn update_merges_and_registers_autostart() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.initialize().await.unwrap();

        let updated = store
            .update(SettingsUpdate {
                run_on_startup: Some(true),
                interval_minutes: Some(30),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(updated.run_on_startup);
        assert_eq!(updated.interval_minutes, 30);
        assert!(updated.close_to_tray);
        assert!(dir.path().join("autostart").join("blink-now.desktop").is_file());
        assert_eq!(store.get_all().await, updated);
    }

    #[tokio::test]
    async fn invalid_update_is_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.initialize().await.unwrap();

        let err = store
            .update(SettingsUpdate {
                run_on_startup: Some(true),
                interval_minutes: Some(0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(EngineError::InvalidInterval { value: 0, .. })
        ));

        let err = store
            .update(SettingsUpdate {
                message: Some("a".repeat(MAX_MESSAGE_CHARS + 1)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(EngineError::MessageTooLong { .. })));

        assert_eq!(store.get_all().await, Settings::default());
    }

    #[tokio::test]
    async fn update_stores_trimmed_message() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let updated = store
            .update(SettingsUpdate {
                message: Some("  Look away  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.message, "Look away");
        assert_eq!(store.get_all().await.message, "Look away");
    }
}

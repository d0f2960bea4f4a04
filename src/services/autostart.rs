//! Login autostart registration
//!
//! Follows the XDG autostart convention: a `.desktop` entry in the user's
//! autostart directory launches the service at login with `--start`.

use std::{
    env, io,
    path::{Path, PathBuf},
};
use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

const ENTRY_FILE: &str = "blink-now.desktop";

/// Autostart entry for one executable in one autostart directory
#[derive(Debug, Clone)]
pub struct Autostart {
    dir: PathBuf,
    exec: PathBuf,
}

impl Autostart {
    pub fn new(dir: impl Into<PathBuf>, exec: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            exec: exec.into(),
        }
    }

    /// Autostart for the running executable in the current user's config directory
    pub fn for_current_user() -> Result<Self> {
        let dir = dirs::config_dir()
            .context("No user configuration directory available")?
            .join("autostart");
        let exec = env::current_exe().context("Failed to resolve current executable")?;
        Ok(Self::new(dir, exec))
    }

    pub fn entry_path(&self) -> PathBuf {
        self.dir.join(ENTRY_FILE)
    }

    pub async fn enable(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.entry_path();
        fs::write(&path, desktop_entry(&self.exec))
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Autostart enabled: {}", path.display());
        Ok(())
    }

    /// Remove the entry; a missing entry already counts as disabled
    pub async fn disable(&self) -> Result<()> {
        let path = self.entry_path();
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Autostart disabled: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Autostart entry {} already absent", path.display());
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }

    pub async fn set(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.enable().await
        } else {
            self.disable().await
        }
    }

    /// Whether the entry exists; an unreadable directory counts as disabled
    pub async fn is_enabled(&self) -> bool {
        fs::try_exists(self.entry_path()).await.unwrap_or(false)
    }
}

fn desktop_entry(exec: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=BlinkNow\n\
         Comment=Eye care reminder\n\
         Exec=\"{}\" --start\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n",
        exec.display()
    )
}

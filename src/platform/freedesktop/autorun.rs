//! Start-at-login registration through an XDG autostart entry

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `<dir>/<app>.desktop` autostart file
pub struct AutostartEntry {
    path: PathBuf,
}

impl AutostartEntry {
    pub fn new(dir: &Path, app_name: &str) -> Self {
        Self {
            path: dir.join(format!("{}.desktop", app_name)),
        }
    }

    /// Entry in the user's `~/.config/autostart`
    pub fn for_user(app_name: &str) -> Result<Self> {
        let dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("autostart");
        Ok(Self::new(&dir, app_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self, exe: &Path) -> bool {
        let expected = format!("Exec=\"{}\"", exe.display());
        std::fs::read_to_string(&self.path)
            .map(|content| content.lines().any(|line| line.trim() == expected))
            .unwrap_or(false)
    }

    pub fn enable(&self, app_name: &str, exe: &Path) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create autostart directory: {:?}", parent))?;
        }
        let content = format!(
            "[Desktop Entry]\nType=Application\nName={}\nExec=\"{}\"\nX-GNOME-Autostart-enabled=true\n",
            app_name,
            exe.display()
        );
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write autostart entry: {:?}", self.path))
    }

    /// Remove the entry; a missing file is not an error
    pub fn disable(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e)
                .with_context(|| format!("Failed to remove autostart entry: {:?}", self.path)),
            _ => Ok(()),
        }
    }
}

pub fn is_enabled(app_name: &str, exe: &Path) -> bool {
    AutostartEntry::for_user(app_name)
        .map(|entry| entry.is_enabled(exe))
        .unwrap_or(false)
}

pub fn enable(app_name: &str, exe: &Path) -> Result<()> {
    AutostartEntry::for_user(app_name)?.enable(app_name, exe)
}

pub fn disable(app_name: &str) -> Result<()> {
    AutostartEntry::for_user(app_name)?.disable()
}

//! Start-at-login registration through the HKCU Run key

use super::registry::{RegKey, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE};
use anyhow::{Context, Result};
use std::path::Path;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

fn quoted(exe: &Path) -> String {
    format!("\"{}\"", exe.display())
}

/// Whether the Run entry exists and points at `exe`
pub fn is_enabled(app_name: &str, exe: &Path) -> bool {
    RegKey::open(HKEY_CURRENT_USER, RUN_KEY, KEY_QUERY_VALUE)
        .ok()
        .and_then(|key| key.read_string(app_name).ok().flatten())
        .is_some_and(|command| command.eq_ignore_ascii_case(&quoted(exe)))
}

pub fn enable(app_name: &str, exe: &Path) -> Result<()> {
    let key = RegKey::open(HKEY_CURRENT_USER, RUN_KEY, KEY_SET_VALUE)
        .context("Failed to open Run key")?;
    key.write_string(app_name, &quoted(exe))
        .with_context(|| format!("Failed to register {} for autorun", app_name))
}

pub fn disable(app_name: &str) -> Result<()> {
    let key = RegKey::open(HKEY_CURRENT_USER, RUN_KEY, KEY_SET_VALUE)
        .context("Failed to open Run key")?;
    key.delete_value(app_name)
        .with_context(|| format!("Failed to remove {} from autorun", app_name))
}

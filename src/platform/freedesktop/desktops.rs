//! Current desktop through EWMH, as reported by `wmctrl -d`

use crate::desktop::{DesktopIndex, DesktopIndexProvider, ProviderError, ProviderFactory};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

const WMCTRL: &str = "wmctrl";

/// Position of the line marked `*` in `wmctrl -d` output
pub fn parse_wmctrl_desktops(output: &str) -> Result<DesktopIndex, ProviderError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .position(|line| line.split_whitespace().nth(1) == Some("*"))
        .map(DesktopIndex::from_position)
        .ok_or(ProviderError::CurrentNotListed)
}

/// First `program` found in a `PATH`-style list of directories
pub fn find_program(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// There is only one EWMH layout; acquiring only locates the tool
pub struct DesktopProviderFactory;

impl DesktopProviderFactory {
    pub fn detect() -> Self {
        info!("Using EWMH desktops via wmctrl");
        Self
    }
}

impl ProviderFactory for DesktopProviderFactory {
    type Provider = WmctrlDesktops;

    fn acquire(&mut self) -> Result<WmctrlDesktops, ProviderError> {
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        let program = find_program(WMCTRL, &search_path)
            .ok_or_else(|| ProviderError::Unavailable(format!("{} not found in PATH", WMCTRL)))?;
        debug!("Using {}", program.display());
        Ok(WmctrlDesktops::new(program))
    }
}

pub struct WmctrlDesktops {
    program: PathBuf,
}

impl WmctrlDesktops {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DesktopIndexProvider for WmctrlDesktops {
    fn current(&mut self) -> Result<DesktopIndex, ProviderError> {
        let output = Command::new(&self.program)
            .arg("-d")
            .stderr(Stdio::null())
            .output()?;
        if !output.status.success() {
            return Err(ProviderError::Unavailable(format!(
                "wmctrl exited with {}",
                output.status
            )));
        }
        parse_wmctrl_desktops(&String::from_utf8_lossy(&output.stdout))
    }
}

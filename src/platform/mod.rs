//! Platform module - Host collaborators
//!
//! Each host provides the same set of items:
//! - `ThemePreference` / `ThemeChangeNotifier` for the appearance watcher
//! - `DesktopProviderFactory` for the desktop poller
//! - `icon_metric()` for sizing the glyph
//! - `autorun::{is_enabled, enable, disable}` for the tray menu toggle

pub mod shell_state;

#[cfg(target_os = "windows")]
mod win32;
#[cfg(target_os = "windows")]
pub use win32::*;

#[cfg(not(target_os = "windows"))]
mod freedesktop;
#[cfg(not(target_os = "windows"))]
pub use freedesktop::*;

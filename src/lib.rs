//! Virtual Desktop Indicator
//!
//! A tray application that shows the number of the current virtual desktop.
//!
//! # Features
//! - Polls the host for the active desktop and redraws only when it changes
//! - Renders a crisp, non-anti-aliased badge colored per desktop
//! - Follows the system light/dark preference through change notifications
//! - Shows an alert badge and re-initializes when desktop enumeration fails
//! - Optional start at login from the tray menu

pub mod appearance;
pub mod core;
pub mod desktop;
pub mod glyph;
pub mod platform;
pub mod tray;

pub use appearance::{AppearanceMode, AppearanceWatcher};
pub use core::config::Config;
pub use core::events::AppEvent;
pub use desktop::{DesktopIndex, DesktopPoller};
pub use glyph::{Glyph, GlyphRenderer, IconSize};

//! Tray module - System tray icon and menu

mod icon;
mod menu;

pub use icon::{glyph_size, icon_from_glyph, tooltip};
pub use menu::{pump_events, TrayAction, TrayManager};

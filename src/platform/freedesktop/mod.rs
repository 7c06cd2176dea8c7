//! Freedesktop host integration: gsettings theme, EWMH desktops, XDG autostart

pub mod autorun;
mod desktops;
mod theme;

pub use desktops::{parse_wmctrl_desktops, DesktopProviderFactory, WmctrlDesktops};
pub use theme::{parse_color_scheme, ThemeChangeNotifier, ThemePreference};

/// Conventional large-icon size; there is no portable metric to query
pub fn icon_metric() -> (i32, i32) {
    (32, 32)
}

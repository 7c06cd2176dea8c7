//! Tray icon conversion

use crate::glyph::{Glyph, IconSize};
use crate::platform;
use tray_icon::{BadIcon, Icon};

/// Glyph size for this host: half the system icon metric, at least `min_size`
pub fn glyph_size(min_size: u32) -> IconSize {
    let (width, height) = platform::icon_metric();
    IconSize::from_metric(width, height, min_size)
}

/// Convert a rendered glyph into a tray icon
pub fn icon_from_glyph(glyph: Glyph) -> Result<Icon, BadIcon> {
    let (width, height) = (glyph.width(), glyph.height());
    Icon::from_rgba(glyph.into_rgba(), width, height)
}

/// Tooltip text for a desktop index
pub fn tooltip(index: crate::desktop::DesktopIndex) -> String {
    if index.is_unknown() {
        "Virtual desktop unknown".to_string()
    } else {
        format!("Virtual desktop {}", index)
    }
}

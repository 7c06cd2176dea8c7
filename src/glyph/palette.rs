//! Glyph colors per appearance mode

use crate::appearance::AppearanceMode;
use crate::desktop::DesktopIndex;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }
}

/// Named colors used by the palettes
pub mod named {
    use super::Rgba;

    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const GOLD: Rgba = Rgba::opaque(0xFF, 0xD7, 0x00);
    pub const LIGHT_GREEN: Rgba = Rgba::opaque(0x90, 0xEE, 0x90);
    pub const LIGHT_SKY_BLUE: Rgba = Rgba::opaque(0x87, 0xCE, 0xFA);
    pub const BLUE: Rgba = Rgba::opaque(0x00, 0x00, 0xFF);
    pub const DARK_GREEN: Rgba = Rgba::opaque(0x00, 0x64, 0x00);
    pub const RED: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);
}

/// Color shown when the desktop index is unknown, regardless of mode
pub const ALERT_COLOR: Rgba = named::RED;

const DARK_PALETTE: [Rgba; 4] = [
    named::WHITE,
    named::GOLD,
    named::LIGHT_GREEN,
    named::LIGHT_SKY_BLUE,
];

const LIGHT_PALETTE: [Rgba; 4] = [named::BLACK, named::GOLD, named::BLUE, named::DARK_GREEN];

/// Desktop colors for a mode, first desktop first
pub fn palette(mode: AppearanceMode) -> &'static [Rgba; 4] {
    match mode {
        AppearanceMode::Dark => &DARK_PALETTE,
        AppearanceMode::Light => &LIGHT_PALETTE,
    }
}

/// Color for a desktop; indices past the palette reuse its last color
pub fn glyph_color(index: DesktopIndex, mode: AppearanceMode) -> Rgba {
    if index.is_unknown() {
        return ALERT_COLOR;
    }
    let colors = palette(mode);
    let position = (index.get() as usize).min(colors.len()) - 1;
    colors[position]
}

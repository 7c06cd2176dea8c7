//! Glyph module - Procedural tray badge rendering
//!
//! A glyph is a small square with a colored border and the desktop number in
//! the middle. Rendering is deterministic for a given index, mode, size and
//! rasterizer, and never anti-aliases: edges are whole pixels at full opacity.

mod palette;
mod text;

pub use palette::{glyph_color, named, palette, Rgba, ALERT_COLOR};
pub use text::{FontError, FontRasterizer, TextMask, TextRasterizer};

use crate::appearance::AppearanceMode;
use crate::desktop::DesktopIndex;

/// Glyph edge length the border thickness is measured against
pub const BASE_ICON_SIZE: u32 = 16;

/// Label shown when the desktop is unknown
pub const UNKNOWN_LABEL: &str = "?";

/// Label shown for indices that do not fit in two digits
pub const OVERFLOW_LABEL: &str = "++";

/// Glyph dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Derive the glyph size from the host's icon metric.
    ///
    /// The metric is halved because drawing at the native size makes the host
    /// rescale with smoothing; the result is floored at `min`.
    pub fn from_metric(metric_width: i32, metric_height: i32, min: u32) -> Self {
        let half = |metric: i32| (metric.max(0) as u32 / 2).max(min);
        Self::new(half(metric_width), half(metric_height))
    }
}

/// Label text for a desktop index
pub fn glyph_label(index: DesktopIndex) -> String {
    match index.get() {
        0 => UNKNOWN_LABEL.to_string(),
        n if n < 100 => n.to_string(),
        _ => OVERFLOW_LABEL.to_string(),
    }
}

/// Border thickness in pixels for a glyph width
pub fn border_thickness(width: u32) -> u32 {
    width / BASE_ICON_SIZE
}

/// Label font size in pixels for a glyph width
pub fn font_size(width: u32) -> f32 {
    (width as f32 / 1.5).ceil()
}

/// Top-left corner of the label's layout box.
///
/// The vertical position is biased two pixels up to offset the descender
/// space included in the measured line height.
pub fn text_origin(size: IconSize, text_width: f32, text_height: f32) -> (i32, i32) {
    let x = ((size.width as f32 - text_width) / 2.0).ceil();
    let y = ((size.height as f32 - text_height - 2.0) / 2.0).ceil();
    (x as i32, y as i32)
}

/// Owned RGBA8 bitmap, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Glyph {
    /// Fully transparent canvas
    pub fn transparent(size: IconSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            rgba: vec![0; size.width as usize * size.height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = self.offset(x, y);
        Rgba::new(self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3])
    }

    /// Set a pixel; coordinates outside the canvas are clipped
    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        self.rgba[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Stroke a one-pixel horizontal line across the full width
    fn row(&mut self, y: u32, color: Rgba) {
        for x in 0..self.width {
            self.put(x as i32, y as i32, color);
        }
    }

    /// Stroke a one-pixel vertical line across the full height
    fn column(&mut self, x: u32, color: Rgba) {
        for y in 0..self.height {
            self.put(x as i32, y as i32, color);
        }
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

/// Renders desktop glyphs with a label rasterizer.
///
/// Holds no mutable state; the same inputs always produce the same glyph.
pub struct GlyphRenderer<R> {
    text: R,
}

impl<R: TextRasterizer> GlyphRenderer<R> {
    pub fn new(text: R) -> Self {
        Self { text }
    }

    pub fn render(&self, index: DesktopIndex, mode: AppearanceMode, size: IconSize) -> Glyph {
        let color = glyph_color(index, mode);
        let label = glyph_label(index);
        let mut glyph = Glyph::transparent(size);

        // Four independent one-pixel strokes per ring keep the edges crisp
        for o in 0..border_thickness(size.width) {
            if o >= size.width || o >= size.height {
                break;
            }
            glyph.row(o, color);
            glyph.column(o, color);
            glyph.column(size.width - 1 - o, color);
            glyph.row(size.height - 1 - o, color);
        }

        let mask = self.text.rasterize(&label, font_size(size.width));
        let (x, y) = text_origin(size, mask.width, mask.height);
        for (col, row) in mask.set_pixels() {
            glyph.put(x + col as i32, y + row as i32, color);
        }

        glyph
    }
}

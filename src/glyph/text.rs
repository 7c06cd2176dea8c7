//! Label rasterization
//!
//! Text is rendered into a one-bit mask covering its measured layout box.
//! The glyph renderer only needs the measured size and the mask, so tests can
//! substitute a deterministic rasterizer for the system font.

use fontdb::{Database, Family, Query, Weight, ID};
use fontdue::{Font, FontSettings};
use tracing::{debug, info};

/// Coverage at or above this value sets a pixel; below it clears it
const COVERAGE_THRESHOLD: u8 = 128;

/// Rasterized label: measured size plus a one-bit pixel mask
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    /// Measured layout width in pixels
    pub width: f32,
    /// Measured layout height in pixels (one line)
    pub height: f32,
    cols: usize,
    rows: usize,
    bits: Vec<bool>,
}

impl TextMask {
    /// Empty mask for a measured layout box
    pub fn blank(width: f32, height: f32) -> Self {
        let cols = width.max(0.0).ceil() as usize;
        let rows = height.max(0.0).ceil() as usize;
        Self {
            width,
            height,
            cols,
            rows,
            bits: vec![false; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Set a pixel; coordinates outside the box are ignored
    pub fn set(&mut self, col: i32, row: i32) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.cols && row < self.rows {
            self.bits[row * self.cols + col] = true;
        }
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.bits[row * self.cols + col]
    }

    /// Iterate over the set pixels as `(col, row)`
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .map(move |(i, _)| (i % self.cols, i / self.cols))
    }
}

/// Measures and rasterizes a label at a pixel size
pub trait TextRasterizer {
    fn rasterize(&self, text: &str, px: f32) -> TextMask;
}

/// Loading the default font failed
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("no usable system font found")]
    NotFound,
    #[error("failed to parse font {family}: {reason}")]
    Parse { family: String, reason: String },
}

/// Families tried in order when the generic sans-serif lookup misses.
///
/// fontdb maps `SansSerif` to a single name (Arial), which many hosts lack.
pub const FALLBACK_FAMILIES: &[&str] = &[
    "Microsoft Sans Serif",
    "Segoe UI",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Cantarell",
];

/// Family lookup order: the generic sans-serif face, then the named fallbacks
pub fn lookup_order() -> Vec<Family<'static>> {
    std::iter::once(Family::SansSerif)
        .chain(FALLBACK_FAMILIES.iter().map(|name| Family::Name(name)))
        .collect()
}

/// Pick the label face: bold in the first family that resolves, otherwise
/// any bold face, otherwise any face at all
pub fn find_face(db: &Database) -> Option<ID> {
    for family in lookup_order() {
        let query = Query {
            families: &[family],
            weight: Weight::BOLD,
            ..Query::default()
        };
        if let Some(id) = db.query(&query) {
            return Some(id);
        }
    }

    db.faces()
        .find(|face| face.weight >= Weight::BOLD)
        .or_else(|| db.faces().next())
        .map(|face| face.id)
}

/// Rasterizer backed by the platform's default bold sans-serif face
pub struct FontRasterizer {
    font: Font,
}

impl FontRasterizer {
    /// Load the system default sans-serif face, preferring a bold weight
    pub fn system_default() -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());

        let id = find_face(&db).ok_or(FontError::NotFound)?;
        let family = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "sans-serif".to_string());

        let font = db
            .with_face_data(id, |data, index| {
                Font::from_bytes(
                    data,
                    FontSettings {
                        collection_index: index,
                        ..FontSettings::default()
                    },
                )
            })
            .ok_or(FontError::NotFound)?
            .map_err(|reason| FontError::Parse {
                family: family.clone(),
                reason: reason.to_string(),
            })?;

        info!("Using font {} for the desktop glyph", family);
        Ok(Self { font })
    }
}

impl TextRasterizer for FontRasterizer {
    fn rasterize(&self, text: &str, px: f32) -> TextMask {
        let (ascent, line_height) = self
            .font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.new_line_size))
            .unwrap_or((px, px));
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, px).advance_width)
            .sum();

        let mut mask = TextMask::blank(width, line_height);
        let mut pen_x = 0.0f32;
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, px);
            // Bitmap rows run top-down; ymin is the bottom edge above the baseline
            let left = (pen_x + metrics.xmin as f32).round() as i32;
            let top = (ascent - (metrics.ymin + metrics.height as i32) as f32).round() as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    if coverage[row * metrics.width + col] >= COVERAGE_THRESHOLD {
                        mask.set(left + col as i32, top + row as i32);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
        mask
    }
}

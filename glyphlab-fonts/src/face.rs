//! Backend traits and the values they exchange with the glyph cache and
//! layout engine.
//!
//! All lengths are in pixels at the face's current pixel size. Vertical
//! values follow the y-up typographic convention: ascenders are positive,
//! descenders negative.

use crate::error::FontError;
use crate::types::{AxisDescriptor, TextDirection, VariationSetting};

/// Output of rasterizing one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Distance from the pen position to the left edge of the bitmap.
    pub bearing_x: i32,
    /// Distance from the baseline up to the top edge of the bitmap.
    pub bearing_y: i32,
    /// Horizontal advance.
    pub advance: f32,
    /// One coverage byte per pixel, row-major, `width * height` long.
    pub coverage: Vec<u8>,
}

impl RasterizedGlyph {
    /// True when there is no ink to upload (spaces, missing outlines).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Line metrics reported by the rasterizer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceMetrics {
    pub ascender: f32,
    /// Negative below the baseline.
    pub descender: f32,
    /// Baseline-to-baseline distance.
    pub height: f32,
}

/// Direction-specific extents reported by the shaper.
///
/// For `TopToBottom` these describe the column: the ascender is the distance
/// from the vertical baseline to the right edge, the descender (negative) to
/// the left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontExtents {
    pub ascender: f32,
    pub descender: f32,
    pub line_gap: f32,
}

/// A single shaped glyph with positioning information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID from the font
    pub glyph_id: u32,
    /// Byte index of the first input character this glyph represents
    pub cluster: u32,
    /// Horizontal advance in pixels
    pub x_advance: f32,
    /// Vertical advance in pixels (negative for top-to-bottom text)
    pub y_advance: f32,
    /// Horizontal offset from the pen position
    pub x_offset: f32,
    /// Vertical offset from the baseline
    pub y_offset: f32,
}

/// Options for shaping one line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShapingOptions {
    pub direction: TextDirection,
    /// ISO 15924 script tag (e.g. "Latn", "Arab"); `None` lets the shaper guess
    pub script: Option<String>,
    /// BCP 47 language tag (e.g. "en-US"); `None` or empty means unset
    pub language: Option<String>,
}

impl ShapingOptions {
    pub fn new(direction: TextDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// One loaded font: rasterizer and shaper sharing size and variation state.
pub trait FontFace {
    fn family_name(&self) -> Option<String>;

    fn sub_family_name(&self) -> Option<String>;

    /// Every axis in the font's `fvar` table; empty for static fonts.
    fn variation_axes(&self) -> Vec<AxisDescriptor>;

    fn set_pixel_size(&mut self, pixel_size: u32);

    /// Replace the variation coordinates, one setting per font axis.
    fn set_variation_coordinates(&mut self, settings: &[VariationSetting]);

    /// Nominal glyph for `ch`; 0 (`.notdef`) when the font lacks it.
    fn glyph_index(&self, ch: char) -> u32;

    fn rasterize_glyph(&mut self, glyph_id: u32) -> Result<RasterizedGlyph, FontError>;

    fn metrics(&self) -> FaceMetrics;

    /// Shape one line. An empty result means nothing to draw.
    fn shape(&self, text: &str, options: &ShapingOptions) -> Vec<ShapedGlyph>;

    fn extents_for_direction(&self, direction: TextDirection) -> FontExtents;
}

/// Parses font bytes into a [`FontFace`].
pub trait FontLoader {
    type Face: FontFace;

    fn load(&self, data: Vec<u8>) -> Result<Self::Face, FontError>;
}

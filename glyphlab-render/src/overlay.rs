//! Debug overlay geometry.
//!
//! Guide functions are pure: they turn font metrics and the surface size
//! into surface-space shapes. [`DebugOverlay`] decides which of them to draw
//! from a [`DebugOverlayConfig`].

use crate::backend::RenderBackend;
use crate::geometry::{Point, Rect, SurfaceSize, flip_point, flip_rect};
use glyphlab_config::{DebugOverlayConfig, OverlayColors};
use glyphlab_fonts::FontExtents;

/// Guides for one line (horizontal text) or column (vertical text), in
/// surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGuides {
    pub baseline: (Point, Point),
    /// Between the baseline and the ascent.
    pub ascend_band: Rect<f32>,
    /// Between the descent and the baseline.
    pub descend_band: Rect<f32>,
}

/// Guides for every line from the first baseline (`H - line_height`) down
/// to the bottom of the surface.
///
/// Only the first line is produced when `line_height` is not positive.
pub fn horizontal_guides(
    ascent: f32,
    descent: f32,
    line_height: f32,
    surface: SurfaceSize,
) -> Vec<LineGuides> {
    let (w, h) = (surface.w(), surface.h());
    let mut guides = Vec::new();
    let mut y = h - line_height;
    loop {
        guides.push(LineGuides {
            baseline: (flip_point(Point::new(0.0, y), h), flip_point(Point::new(w, y), h)),
            ascend_band: flip_rect(Rect::new(0.0, y, w, ascent), h),
            descend_band: flip_rect(Rect::new(0.0, y + descent, w, -descent), h),
        });
        if line_height <= 0.0 {
            break;
        }
        y -= line_height;
        if y <= 0.0 {
            break;
        }
    }
    guides
}

/// Column guides for top-to-bottom text, starting at `W + line_width` and
/// moving left by `-line_width` until the left edge.
///
/// Only the first column is produced when `line_width` is not negative.
pub fn vertical_guides(
    extents: FontExtents,
    line_width: f32,
    surface: SurfaceSize,
) -> Vec<LineGuides> {
    let (w, h) = (surface.w(), surface.h());
    let mut guides = Vec::new();
    let mut x = w + line_width;
    loop {
        guides.push(LineGuides {
            baseline: (flip_point(Point::new(x, h), h), flip_point(Point::new(x, 0.0), h)),
            ascend_band: flip_rect(Rect::new(x, 0.0, extents.ascender, h), h),
            descend_band: flip_rect(Rect::new(x + extents.descender, 0.0, -extents.descender, h), h),
        });
        if line_width >= 0.0 {
            break;
        }
        x += line_width;
        if x <= 0.0 {
            break;
        }
    }
    guides
}

/// Vertical line width: `-ascender + descender + line_gap`, negative for
/// columns advancing leftward.
pub fn column_width(extents: FontExtents) -> f32 {
    -extents.ascender + extents.descender + extents.line_gap
}

/// One-pixel caret at the pen position (layout space) in surface space.
pub fn caret_mark(pen: Point, surface_height: f32) -> Rect<f32> {
    flip_rect(Rect::new(pen.x, pen.y, 1.0, 1.0), surface_height)
}

/// Draws enabled overlay parts with their configured colors.
#[derive(Debug, Clone, Copy)]
pub struct DebugOverlay<'a> {
    pub config: &'a DebugOverlayConfig,
    pub colors: &'a OverlayColors,
}

impl<'a> DebugOverlay<'a> {
    pub fn new(config: &'a DebugOverlayConfig, colors: &'a OverlayColors) -> Self {
        Self { config, colors }
    }

    /// Any guide (bands or baselines) is enabled.
    pub fn wants_guides(&self) -> bool {
        self.config.baseline() || self.config.ascend_band() || self.config.descend_band()
    }

    /// Bands first so baselines stay visible on top.
    pub fn draw_guides<B: RenderBackend + ?Sized>(&self, backend: &mut B, guides: &[LineGuides]) {
        for guide in guides {
            if self.config.ascend_band() {
                backend.draw_filled_rect(guide.ascend_band, self.colors.ascend);
            }
            if self.config.descend_band() {
                backend.draw_filled_rect(guide.descend_band, self.colors.descend);
            }
        }
        if self.config.baseline() {
            for guide in guides {
                let (from, to) = guide.baseline;
                backend.draw_line(from, to, self.colors.baseline);
            }
        }
    }

    pub fn draw_glyph_bound<B: RenderBackend + ?Sized>(&self, backend: &mut B, dst: Rect<f32>) {
        if self.config.glyph_bound() {
            backend.draw_outline_rect(dst, self.colors.glyph_bound);
        }
    }

    pub fn draw_caret<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        pen: Point,
        surface_height: f32,
    ) {
        if self.config.caret() {
            backend.draw_filled_rect(caret_mark(pen, surface_height), self.colors.caret);
        }
    }
}

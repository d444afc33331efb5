//! Text layout in four modes.
//!
//! Pen positions are tracked in layout space (origin bottom-left, y up)
//! and converted per draw to surface space with `surface_y = H - y - h`.
//!
//! | mode        | start                 | per glyph                    | per `\n`           |
//! |-------------|-----------------------|------------------------------|--------------------|
//! | no-shape    | `(0, H - lh)`         | draw, `x += advance`         | `x = 0, y -= lh`   |
//! | LTR         | `(0, H - lh)`         | draw, `x += x_advance`       | `x = 0, y -= lh`   |
//! | RTL         | `(W, H - lh)`         | `x -= x_advance`, draw       | `x = W, y -= lh`   |
//! | TTB         | `(W + lw, H)`         | draw, `y += y_advance`       | `y = H, x += lw`   |
//!
//! `lh` is the line height, `lw` the (negative) column width from the
//! vertical extents. Shaped glyphs are drawn at the pen plus their offset.

use crate::backend::RenderBackend;
use crate::font_instance::FontInstance;
use crate::geometry::{Point, flip_rect};
use crate::glyph_cache::GlyphKey;
use crate::overlay::{self, DebugOverlay};
use glyphlab_config::{Color, DebugOverlayConfig, OverlayColors};
use glyphlab_fonts::{FontLoader, ShapingOptions, TextDirection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shaping {
    /// Map characters to glyphs one by one; direction is ignored.
    #[default]
    NoShape,
    Shaped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderMode {
    pub shaping: Shaping,
    pub direction: TextDirection,
}

impl RenderMode {
    pub const NO_SHAPE: RenderMode = RenderMode {
        shaping: Shaping::NoShape,
        direction: TextDirection::LeftToRight,
    };

    pub const fn shaped(direction: TextDirection) -> Self {
        Self {
            shaping: Shaping::Shaped,
            direction,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.shaping {
            Shaping::NoShape => "No shaping",
            Shaping::Shaped => self.direction.label(),
        }
    }
}

/// Everything besides the text that affects one render.
#[derive(Debug, Clone, Default)]
pub struct LayoutParams {
    pub mode: RenderMode,
    /// ISO 15924 tag passed to the shaper.
    pub script: Option<String>,
    /// BCP 47 tag passed to the shaper; empty means unset.
    pub language: Option<String>,
    pub color: Color,
    pub overlay: DebugOverlayConfig,
    pub overlay_colors: OverlayColors,
}

impl LayoutParams {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            color: Color::BLACK,
            ..Self::default()
        }
    }

    fn shaping_options(&self) -> ShapingOptions {
        ShapingOptions {
            direction: self.mode.direction,
            script: self.script.clone(),
            language: self.language.clone().filter(|l| !l.is_empty()),
        }
    }
}

/// Summary of one render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Lines (or columns) laid out.
    pub lines: usize,
    /// Glyphs visited, drawn or not.
    pub glyphs: usize,
    /// Textured quads emitted.
    pub draws: usize,
    /// Glyph cache misses during this call.
    pub rasterized: u64,
}

/// Lays out text with one font onto one backend.
pub struct TextLayoutEngine<'a, L: FontLoader, B: RenderBackend + ?Sized> {
    font: &'a mut FontInstance<L>,
    backend: &'a mut B,
}

impl<'a, L: FontLoader, B: RenderBackend + ?Sized> TextLayoutEngine<'a, L, B> {
    pub fn new(font: &'a mut FontInstance<L>, backend: &'a mut B) -> Self {
        Self { font, backend }
    }

    /// Lay out and draw `text`. Does nothing for an invalid font or empty
    /// text, apart from freeing textures released since the last call.
    pub fn render(&mut self, text: &str, params: &LayoutParams) -> RenderStats {
        self.backend.collect_released();

        if !self.font.is_valid() {
            log::debug!("render skipped: font is not valid");
            return RenderStats::default();
        }
        if text.is_empty() {
            return RenderStats::default();
        }

        let misses_before = self.font.glyph_cache().misses();
        let mut stats = match (params.mode.shaping, params.mode.direction) {
            (Shaping::NoShape, _) => self.render_unshaped(text, params),
            (Shaping::Shaped, TextDirection::LeftToRight) => self.render_ltr(text, params),
            (Shaping::Shaped, TextDirection::RightToLeft) => self.render_rtl(text, params),
            (Shaping::Shaped, TextDirection::TopToBottom) => self.render_ttb(text, params),
        };
        stats.rasterized = self.font.glyph_cache().misses() - misses_before;

        let cache = self.font.glyph_cache();
        log::debug!(
            "{}: {} lines, {} glyphs, {} draws, {} rasterized (cache {} hits / {} misses)",
            params.mode.label(),
            stats.lines,
            stats.glyphs,
            stats.draws,
            stats.rasterized,
            cache.hits(),
            cache.misses()
        );
        stats
    }

    fn draw_horizontal_guides(&mut self, params: &LayoutParams) {
        let overlay = DebugOverlay::new(&params.overlay, &params.overlay_colors);
        if !overlay.wants_guides() {
            return;
        }
        let metrics = self.font.metrics();
        let guides = overlay::horizontal_guides(
            metrics.ascent,
            metrics.descent,
            metrics.line_height,
            self.backend.surface_size(),
        );
        overlay.draw_guides(&mut *self.backend, &guides);
    }

    /// Draw one glyph with its pen at `pen` and ink offset by `offset`.
    /// Returns the cached advance, or `None` if the glyph is unavailable.
    fn draw_glyph(
        &mut self,
        key: GlyphKey,
        pen: Point,
        offset: Point,
        params: &LayoutParams,
        stats: &mut RenderStats,
    ) -> Option<i32> {
        let surface_height = self.backend.surface_size().h();
        let overlay = DebugOverlay::new(&params.overlay, &params.overlay_colors);
        stats.glyphs += 1;

        let entry = self.font.glyph(&mut *self.backend, key)?;
        let advance = entry.advance;
        if let Some(texture) = entry.texture.as_ref()
            && !entry.bound.is_empty()
        {
            let ink = entry
                .bound
                .to_f32()
                .translate(pen.x + offset.x, pen.y + offset.y);
            let dst = flip_rect(ink, surface_height);
            self.backend.draw_textured_quad(texture, dst, params.color);
            stats.draws += 1;
            overlay.draw_glyph_bound(&mut *self.backend, dst);
        }
        overlay.draw_caret(&mut *self.backend, pen, surface_height);
        Some(advance)
    }

    fn render_unshaped(&mut self, text: &str, params: &LayoutParams) -> RenderStats {
        self.draw_horizontal_guides(params);

        let line_height = self.font.metrics().line_height;
        let top = self.backend.surface_size().h() - line_height;
        let mut stats = RenderStats {
            lines: 1,
            ..RenderStats::default()
        };
        let mut pen = Point::new(0.0, top);

        for ch in text.chars() {
            match ch {
                '\n' => {
                    pen.x = 0.0;
                    pen.y -= line_height;
                    stats.lines += 1;
                }
                '\r' => {}
                _ => {
                    let advance = self
                        .draw_glyph(GlyphKey::Char(ch), pen, Point::default(), params, &mut stats)
                        .unwrap_or(0);
                    pen.x += advance as f32;
                }
            }
        }
        stats
    }

    fn render_ltr(&mut self, text: &str, params: &LayoutParams) -> RenderStats {
        self.draw_horizontal_guides(params);

        let options = params.shaping_options();
        let line_height = self.font.metrics().line_height;
        let mut stats = RenderStats::default();
        let mut y = self.backend.surface_size().h() - line_height;

        for line in split_lines(text) {
            stats.lines += 1;
            let mut x = 0.0;
            if let Some(run) = self.font.shape_line(line, &options) {
                for glyph in run.iter() {
                    let offset = Point::new(glyph.x_offset, glyph.y_offset);
                    self.draw_glyph(
                        GlyphKey::Index(glyph.glyph_id),
                        Point::new(x, y),
                        offset,
                        params,
                        &mut stats,
                    );
                    x += glyph.x_advance;
                }
            }
            y -= line_height;
        }
        stats
    }

    fn render_rtl(&mut self, text: &str, params: &LayoutParams) -> RenderStats {
        self.draw_horizontal_guides(params);

        let options = params.shaping_options();
        let line_height = self.font.metrics().line_height;
        let surface = self.backend.surface_size();
        let mut stats = RenderStats::default();
        let mut y = surface.h() - line_height;

        for line in split_lines(text) {
            stats.lines += 1;
            let mut x = surface.w();
            if let Some(run) = self.font.shape_line(line, &options) {
                for glyph in run.iter().rev() {
                    x -= glyph.x_advance;
                    let offset = Point::new(glyph.x_offset, glyph.y_offset);
                    self.draw_glyph(
                        GlyphKey::Index(glyph.glyph_id),
                        Point::new(x, y),
                        offset,
                        params,
                        &mut stats,
                    );
                }
            }
            y -= line_height;
        }
        stats
    }

    fn render_ttb(&mut self, text: &str, params: &LayoutParams) -> RenderStats {
        let Some(extents) = self.font.extents_for_direction(TextDirection::TopToBottom) else {
            return RenderStats::default();
        };
        let line_width = overlay::column_width(extents);
        let surface = self.backend.surface_size();

        let overlay = DebugOverlay::new(&params.overlay, &params.overlay_colors);
        if overlay.wants_guides() {
            let guides = overlay::vertical_guides(extents, line_width, surface);
            overlay.draw_guides(&mut *self.backend, &guides);
        }

        let options = params.shaping_options();
        let mut stats = RenderStats::default();
        let mut x = surface.w() + line_width;

        for line in split_lines(text) {
            stats.lines += 1;
            let mut y = surface.h();
            if let Some(run) = self.font.shape_line(line, &options) {
                for glyph in run.iter() {
                    let offset = Point::new(glyph.x_offset, glyph.y_offset);
                    self.draw_glyph(
                        GlyphKey::Index(glyph.glyph_id),
                        Point::new(x, y),
                        offset,
                        params,
                        &mut stats,
                    );
                    y += glyph.y_advance;
                }
            }
            x += line_width;
        }
        stats
    }
}

/// Split on `\n`, dropping a trailing `\r` from each line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a\r\nb\n\nc").collect();
        assert_eq!(lines, vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_trailing_newline_yields_empty_line() {
        assert_eq!(split_lines("a\n").count(), 2);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(RenderMode::NO_SHAPE.label(), "No shaping");
        assert_eq!(
            RenderMode::shaped(TextDirection::RightToLeft).label(),
            TextDirection::RightToLeft.label()
        );
    }

    #[test]
    fn test_empty_language_is_unset() {
        let params = LayoutParams {
            language: Some(String::new()),
            script: Some("Latn".into()),
            ..LayoutParams::new(RenderMode::shaped(TextDirection::LeftToRight))
        };
        let options = params.shaping_options();
        assert_eq!(options.language, None);
        assert_eq!(options.script.as_deref(), Some("Latn"));
    }
}

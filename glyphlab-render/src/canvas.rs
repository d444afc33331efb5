//! Software render backend drawing into an RGBA image.
//!
//! Glyph textures are kept as single-channel coverage images and blended
//! with source-over alpha compositing. Geometry is snapped to whole pixels.

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::texture::{ReleaseQueue, TextureHandle, TextureId};
use glyphlab_config::Color;
use image::{GrayImage, ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

pub struct CanvasBackend {
    image: RgbaImage,
    textures: HashMap<TextureId, GrayImage>,
    queue: ReleaseQueue,
    next_id: u64,
}

impl CanvasBackend {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.as_array())),
            textures: HashMap::new(),
            queue: ReleaseQueue::new(),
            next_id: 1,
        })
    }

    pub fn clear(&mut self, color: Color) {
        let fill = Rgba(color.as_array());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Number of textures currently held.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "Saved {}x{} canvas to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        if color.a == 0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = Rgba(blend_over(dst.0, color.as_array()));
    }

    /// Integer pixel span `[x0, x1) x [y0, y1)` covered by `rect`, clipped.
    fn pixel_span(&self, rect: Rect<f32>) -> (i64, i64, i64, i64) {
        let rect = rect.normalized();
        let x0 = (rect.x.round() as i64).max(0);
        let y0 = (rect.y.round() as i64).max(0);
        let x1 = (rect.right().round() as i64).min(self.image.width() as i64);
        let y1 = (rect.bottom().round() as i64).min(self.image.height() as i64);
        (x0, y0, x1, y1)
    }
}

/// Straight-alpha source-over.
fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

impl RenderBackend for CanvasBackend {
    fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.width(), self.image.height())
    }

    fn upload_bitmap(
        &mut self,
        width: u32,
        height: u32,
        coverage: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        let expected = (width as usize) * (height as usize);
        let bitmap = GrayImage::from_raw(width, height, coverage.to_vec()).ok_or(
            RenderError::InvalidTextureData {
                expected,
                actual: coverage.len(),
            },
        )?;
        self.collect_released();
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, bitmap);
        Ok(TextureHandle::new(id, width, height, &self.queue))
    }

    fn release_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_none() {
            log::warn!("Release of unknown texture {}", id);
        }
    }

    fn release_queue(&self) -> &ReleaseQueue {
        &self.queue
    }

    fn draw_textured_quad(&mut self, texture: &TextureHandle, dst: Rect<f32>, tint: Color) {
        let Some(bitmap) = self.textures.get(&texture.id()) else {
            log::warn!("Draw with released texture {}", texture.id());
            return;
        };
        let dst = dst.normalized();
        if dst.w <= 0.0 || dst.h <= 0.0 || bitmap.width() == 0 || bitmap.height() == 0 {
            return;
        }
        let origin_x = dst.x.round() as i64;
        let origin_y = dst.y.round() as i64;
        let (x0, y0, x1, y1) = self.pixel_span(dst);
        let scale_x = bitmap.width() as f32 / dst.w;
        let scale_y = bitmap.height() as f32 / dst.h;

        // Sample first so the texture borrow ends before blending.
        let mut samples = Vec::with_capacity(((x1 - x0).max(0) * (y1 - y0).max(0)) as usize);
        for py in y0..y1 {
            let ty = (((py - origin_y) as f32 + 0.5) * scale_y) as u32;
            for px in x0..x1 {
                let tx = (((px - origin_x) as f32 + 0.5) * scale_x) as u32;
                let coverage = bitmap
                    .get_pixel(tx.min(bitmap.width() - 1), ty.min(bitmap.height() - 1))
                    .0[0];
                if coverage > 0 {
                    samples.push((px, py, coverage));
                }
            }
        }
        for (px, py, coverage) in samples {
            self.blend_pixel(px, py, tint.with_coverage(coverage));
        }
    }

    fn draw_filled_rect(&mut self, rect: Rect<f32>, color: Color) {
        let (x0, y0, x1, y1) = self.pixel_span(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    fn draw_outline_rect(&mut self, rect: Rect<f32>, color: Color) {
        let rect = rect.normalized();
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let x1 = rect.right().round() as i64 - 1;
        let y1 = rect.bottom().round() as i64 - 1;
        if x1 < x0 || y1 < y0 {
            return;
        }
        for x in x0..=x1 {
            self.blend_pixel(x, y0, color);
            if y1 != y0 {
                self.blend_pixel(x, y1, color);
            }
        }
        for y in (y0 + 1)..y1 {
            self.blend_pixel(x0, y, color);
            if x1 != x0 {
                self.blend_pixel(x1, y, color);
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        let max_steps = (self.image.width() + self.image.height()) as i64 * 2;
        for i in 0..=steps.min(max_steps) {
            let t = i as f32 / steps as f32;
            let x = (from.x + dx * t).round() as i64;
            let y = (from.y + dy * t).round() as i64;
            self.blend_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Color = Color::new(0x80, 0x80, 0x80, 0xFF);

    fn pixel(canvas: &CanvasBackend, x: u32, y: u32) -> [u8; 4] {
        canvas.image().get_pixel(x, y).0
    }

    #[test]
    fn test_zero_surface_rejected() {
        assert!(matches!(
            CanvasBackend::new(0, 10, GREY),
            Err(RenderError::InvalidSurface { .. })
        ));
    }

    #[test]
    fn test_filled_rect_opaque() {
        let mut canvas = CanvasBackend::new(8, 8, GREY).unwrap();
        canvas.draw_filled_rect(Rect::new(2.0, 2.0, 2.0, 2.0), Color::BLACK);
        assert_eq!(pixel(&canvas, 2, 2), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 3, 3), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 4, 4), GREY.as_array());
    }

    #[test]
    fn test_filled_rect_clips_to_surface() {
        let mut canvas = CanvasBackend::new(4, 4, GREY).unwrap();
        canvas.draw_filled_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Color::WHITE);
        assert!(canvas.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut canvas = CanvasBackend::new(1, 1, Color::BLACK).unwrap();
        canvas.draw_filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::new(255, 255, 255, 128));
        let [r, g, b, a] = pixel(&canvas, 0, 0);
        assert_eq!(a, 255);
        assert!((127..=129).contains(&r));
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_textured_quad_uses_coverage() {
        let mut canvas = CanvasBackend::new(4, 4, Color::WHITE).unwrap();
        let texture = canvas.upload_bitmap(2, 1, &[255, 0]).unwrap();
        canvas.draw_textured_quad(&texture, Rect::new(1.0, 1.0, 2.0, 1.0), Color::BLACK);
        assert_eq!(pixel(&canvas, 1, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 2, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_released_texture_is_freed_on_next_upload() {
        let mut canvas = CanvasBackend::new(4, 4, Color::WHITE).unwrap();
        let first = canvas.upload_bitmap(1, 1, &[255]).unwrap();
        assert_eq!(canvas.texture_count(), 1);
        drop(first);
        let _second = canvas.upload_bitmap(1, 1, &[255]).unwrap();
        assert_eq!(canvas.texture_count(), 1);
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut canvas = CanvasBackend::new(5, 5, GREY).unwrap();
        canvas.draw_outline_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK);
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 4, 2), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 2, 2), GREY.as_array());
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = CanvasBackend::new(5, 3, GREY).unwrap();
        canvas.draw_line(Point::new(0.0, 1.0), Point::new(5.0, 1.0), Color::BLACK);
        for x in 0..5 {
            assert_eq!(pixel(&canvas, x, 1), [0, 0, 0, 255]);
        }
        assert_eq!(pixel(&canvas, 0, 0), GREY.as_array());
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let canvas = CanvasBackend::new(3, 2, GREY).unwrap();
        canvas.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, GREY.as_array());
    }
}

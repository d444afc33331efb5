//! The drawing surface abstraction used by the layout engine.
//!
//! All coordinates passed to a backend are in surface space (origin top-left,
//! y down, pixels).

use crate::error::RenderError;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::texture::{ReleaseQueue, TextureHandle, TextureId};
use glyphlab_config::Color;

pub trait RenderBackend {
    fn surface_size(&self) -> SurfaceSize;

    /// Upload a single-channel coverage bitmap (`width * height` bytes,
    /// row-major) and return its owning handle.
    fn upload_bitmap(
        &mut self,
        width: u32,
        height: u32,
        coverage: &[u8],
    ) -> Result<TextureHandle, RenderError>;

    /// Free the storage behind a texture whose handle has been dropped.
    fn release_texture(&mut self, id: TextureId);

    /// Queue shared with every handle this backend has issued.
    fn release_queue(&self) -> &ReleaseQueue;

    /// Draw a texture's coverage into `dst`, tinted with `tint`.
    fn draw_textured_quad(&mut self, texture: &TextureHandle, dst: Rect<f32>, tint: Color);

    fn draw_filled_rect(&mut self, rect: Rect<f32>, color: Color);

    /// One-pixel outline along the inside of `rect`.
    fn draw_outline_rect(&mut self, rect: Rect<f32>, color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Free every texture whose handle was dropped since the last call.
    /// Returns how many were released.
    fn collect_released(&mut self) -> usize {
        let ids = self.release_queue().drain();
        let count = ids.len();
        for id in ids {
            self.release_texture(id);
        }
        if count > 0 {
            log::trace!("Released {} texture(s)", count);
        }
        count
    }
}

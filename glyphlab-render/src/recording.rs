//! A backend that records draw calls instead of drawing.
//!
//! Used by tests and by `glyphlab render --dry-run` to inspect layout output.
//! Texture bookkeeping is real: uploads and releases are counted so texture
//! lifetimes can be checked.

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::texture::{ReleaseQueue, TextureHandle, TextureId};
use glyphlab_config::Color;
use std::collections::BTreeSet;

/// Records a draw call for later verification.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    TexturedQuad {
        texture: TextureId,
        dst: Rect<f32>,
        tint: Color,
    },
    FilledRect {
        rect: Rect<f32>,
        color: Color,
    },
    OutlineRect {
        rect: Rect<f32>,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
}

pub struct RecordingBackend {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    queue: ReleaseQueue,
    next_id: u64,
    live: BTreeSet<TextureId>,
    uploaded: usize,
    released: Vec<TextureId>,
    /// Releases of ids that were not live (double frees or foreign ids).
    bad_releases: usize,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            commands: Vec::new(),
            queue: ReleaseQueue::new(),
            next_id: 1,
            live: BTreeSet::new(),
            uploaded: 0,
            released: Vec::new(),
            bad_releases: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Destination rects of every textured quad, in draw order.
    pub fn quads(&self) -> Vec<(TextureId, Rect<f32>)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::TexturedQuad { texture, dst, .. } => Some((*texture, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn count_quads(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::TexturedQuad { .. }))
            .count()
    }

    pub fn count_matching(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|cmd| match cmd {
                DrawCommand::TexturedQuad { .. } => false,
                DrawCommand::FilledRect { color: c, .. }
                | DrawCommand::OutlineRect { color: c, .. }
                | DrawCommand::Line { color: c, .. } => *c == color,
            })
            .count()
    }

    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploaded
    }

    pub fn released(&self) -> &[TextureId] {
        &self.released
    }

    pub fn bad_releases(&self) -> usize {
        self.bad_releases
    }
}

impl RenderBackend for RecordingBackend {
    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn upload_bitmap(
        &mut self,
        width: u32,
        height: u32,
        coverage: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        let expected = (width as usize) * (height as usize);
        if coverage.len() != expected {
            return Err(RenderError::InvalidTextureData {
                expected,
                actual: coverage.len(),
            });
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        self.uploaded += 1;
        Ok(TextureHandle::new(id, width, height, &self.queue))
    }

    fn release_texture(&mut self, id: TextureId) {
        if self.live.remove(&id) {
            self.released.push(id);
        } else {
            log::error!("Release of unknown texture {}", id);
            self.bad_releases += 1;
        }
    }

    fn release_queue(&self) -> &ReleaseQueue {
        &self.queue
    }

    fn draw_textured_quad(&mut self, texture: &TextureHandle, dst: Rect<f32>, tint: Color) {
        self.commands.push(DrawCommand::TexturedQuad {
            texture: texture.id(),
            dst,
            tint,
        });
    }

    fn draw_filled_rect(&mut self, rect: Rect<f32>, color: Color) {
        self.commands.push(DrawCommand::FilledRect { rect, color });
    }

    fn draw_outline_rect(&mut self, rect: Rect<f32>, color: Color) {
        self.commands.push(DrawCommand::OutlineRect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_and_release_bookkeeping() {
        let mut backend = RecordingBackend::new(10, 10);
        let handle = backend.upload_bitmap(2, 2, &[255; 4]).unwrap();
        assert_eq!(backend.live_textures(), 1);
        let id = handle.id();
        drop(handle);
        assert_eq!(backend.live_textures(), 1, "freed only on collect");
        assert_eq!(backend.collect_released(), 1);
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.released(), &[id]);
        assert_eq!(backend.bad_releases(), 0);
    }

    #[test]
    fn test_upload_rejects_wrong_size() {
        let mut backend = RecordingBackend::new(10, 10);
        let result = backend.upload_bitmap(3, 3, &[0; 4]);
        assert!(matches!(
            result,
            Err(RenderError::InvalidTextureData {
                expected: 9,
                actual: 4
            })
        ));
        assert_eq!(backend.uploaded_count(), 0);
    }

    #[test]
    fn test_double_release_is_counted() {
        let mut backend = RecordingBackend::new(10, 10);
        backend.release_texture(TextureId(99));
        assert_eq!(backend.bad_releases(), 1);
    }

    #[test]
    fn test_records_commands_in_order() {
        let mut backend = RecordingBackend::new(10, 10);
        backend.draw_filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        backend.draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Color::WHITE);
        assert_eq!(backend.commands().len(), 2);
        assert_eq!(backend.count_matching(Color::WHITE), 1);
        assert_eq!(backend.take_commands().len(), 2);
        assert!(backend.commands().is_empty());
    }
}

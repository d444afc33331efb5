//! Owned GPU-style texture handles.
//!
//! A [`TextureHandle`] is the only owner of its texture. Dropping it queues
//! the id on the backend's [`ReleaseQueue`]; the backend frees queued
//! textures in [`RenderBackend::collect_released`](crate::RenderBackend::collect_released).
//! Handles are not `Clone`, so every texture is released exactly once.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Backend-assigned texture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u64);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// Ids of dropped handles waiting to be freed by their backend.
#[derive(Debug, Clone, Default)]
pub struct ReleaseQueue {
    pending: Arc<Mutex<Vec<TextureId>>>,
}

impl ReleaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, id: TextureId) {
        self.pending.lock().push(id);
    }

    /// Take every queued id, oldest first.
    pub fn drain(&self) -> Vec<TextureId> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// True when both refer to the same backend's queue.
    pub fn same_queue(&self, other: &ReleaseQueue) -> bool {
        Arc::ptr_eq(&self.pending, &other.pending)
    }
}

/// Exclusive owner of one uploaded coverage bitmap.
pub struct TextureHandle {
    id: TextureId,
    width: u32,
    height: u32,
    queue: ReleaseQueue,
}

impl TextureHandle {
    /// Called by backends when a bitmap is uploaded.
    pub fn new(id: TextureId, width: u32, height: u32, queue: &ReleaseQueue) -> Self {
        Self {
            id,
            width,
            height,
            queue: queue.clone(),
        }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        self.queue.push(self.id);
    }
}

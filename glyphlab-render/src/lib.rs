//! Glyph cache, text layout and render backends for glyphlab.
//!
//! This crate provides:
//!
//! - [`FontInstance`]: a loaded font with its pixel size, variation values,
//!   derived line metrics, glyph cache and shaped-line cache. Size and axis
//!   setters are the only mutators and always invalidate both caches.
//! - [`TextLayoutEngine`]: lays out text in one of four modes (unshaped,
//!   shaped left-to-right, right-to-left, top-to-bottom) and emits draw calls
//! - [`overlay`]: baseline, ascent/descent band, glyph bound and caret geometry
//! - The [`RenderBackend`] trait with a software [`CanvasBackend`] that writes
//!   PNG files and a [`RecordingBackend`] that records draw calls
//!
//! Layout runs in a y-up space anchored at the bottom-left of the surface;
//! backends receive top-left, y-down coordinates.

pub mod backend;
pub mod canvas;
pub mod error;
pub mod font_instance;
pub mod geometry;
pub mod glyph_cache;
pub mod layout;
pub mod overlay;
pub mod recording;
pub mod shape_cache;
pub mod texture;

// Re-export main public types
pub use backend::RenderBackend;
pub use canvas::CanvasBackend;
pub use error::RenderError;
pub use font_instance::{FontInstance, FontMetrics};
pub use geometry::{Point, Rect, SurfaceSize};
pub use glyph_cache::{CacheEntry, GlyphCache, GlyphKey};
pub use layout::{LayoutParams, RenderMode, RenderStats, Shaping, TextLayoutEngine};
pub use recording::{DrawCommand, RecordingBackend};
pub use texture::{ReleaseQueue, TextureHandle, TextureId};

// Re-export shared types from dependencies for convenience
pub use glyphlab_config::{Color, DebugOverlayConfig, OverlayColors};
pub use glyphlab_fonts::TextDirection;

//! Typed error types for glyphlab-render.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by render backends.
///
/// The layout engine itself never returns these: a failed upload degrades to
/// an invisible glyph that still advances the pen.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The supplied coverage buffer does not match the bitmap dimensions.
    #[error("Invalid bitmap data size: expected {expected} bytes, got {actual} bytes")]
    InvalidTextureData {
        /// Expected byte count (`width * height`).
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },

    /// A zero-sized surface was requested.
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    /// The rendered image could not be written.
    #[error("Image save failed for '{path}': {source}")]
    ImageSave {
        /// Destination path.
        path: PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },
}

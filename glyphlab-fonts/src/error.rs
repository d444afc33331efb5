//! Typed error types for glyphlab-fonts.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or rasterizing a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes are not a font either backend can parse.
    #[error("Font load failed: {0}")]
    Load(String),

    /// The font file could not be read from disk.
    #[error("Font file read failed for '{path}': {source}")]
    FileRead {
        /// Path to the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend could not rasterize a glyph.
    #[error("Rasterization failed for glyph {glyph_id}")]
    Rasterization {
        /// Glyph index that failed.
        glyph_id: u32,
    },
}

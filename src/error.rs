//! Application-level errors.

use glyphlab_config::ConfigError;
use glyphlab_fonts::FontError;
use glyphlab_render::RenderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The name matched neither a catalog entry nor an existing file.
    #[error("Font '{name}' not found in {dir}")]
    FontNotFound { name: String, dir: PathBuf },

    /// The font directory has no font files and none was given.
    #[error("No font given and no fonts found in {0}")]
    NoFonts(PathBuf),

    #[error("Cannot read font directory {path}: {source}")]
    FontDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read text file {path}: {source}")]
    TextFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

//! glyphlab: a font rendering test bench.
//!
//! The heavy lifting lives in the workspace crates:
//!
//!   - `glyphlab-config` persists settings (font directory, size, colors,
//!     debug overlay flags).
//!   - `glyphlab-fonts` loads, rasterizes and shapes fonts.
//!   - `glyphlab-render` caches glyph rasters and lays text out in any
//!     direction onto a render backend.
//!
//! This crate ties them into a command-line application.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;
pub mod error;

pub use app::{AppContext, RenderOptions};
pub use error::AppError;

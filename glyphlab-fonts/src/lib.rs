//! Font loading, glyph rasterization and text shaping for glyphlab.
//!
//! This crate provides:
//! - The [`FontFace`] / [`FontLoader`] traits the glyph cache and layout
//!   engine are written against
//! - [`SwashFace`], the production face: swash for rasterization and metrics,
//!   rustybuzz for shaping and direction-specific extents
//! - Variation axis types (`ital`, `opsz`, `slnt`, `wght`, `wdth`)
//! - Font directory scanning and the script/language tables offered to users
//!
//! # Architecture
//!
//! A `FontFace` is one loaded font with mutable size and variation state.
//! Everything it returns is already scaled to pixels at the current size, so
//! callers never see font design units.

pub mod catalog;
pub mod error;
pub mod face;
pub mod scripts;
pub mod swash_face;
pub mod text_shaper;
pub mod types;

// Re-export main types for convenience
pub use catalog::{FontCatalog, FontFileEntry, is_font_file, list_font_files};
pub use error::FontError;
pub use face::{
    FaceMetrics, FontExtents, FontFace, FontLoader, RasterizedGlyph, ShapedGlyph, ShapingOptions,
};
pub use scripts::{LANGUAGES, LanguageChoice, SCRIPTS, ScriptChoice};
pub use swash_face::{SwashFace, SwashLoader};
pub use types::{AxisDescriptor, AxisInfo, FontData, TextDirection, VariationAxis, VariationSetting};

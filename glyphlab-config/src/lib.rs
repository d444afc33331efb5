//! Configuration system for glyphlab.
//!
//! This crate provides settings loading, saving, and default values for the
//! font test bench. It includes:
//!
//! - The persisted [`Settings`] file (last-used font directory and render
//!   defaults)
//! - Debug overlay toggles
//! - Color definitions for text, background and overlay geometry
//! - Log level selection

pub mod defaults;
pub mod error;
pub mod settings;
mod types;

pub use error::ConfigError;
pub use settings::{SETTINGS_FILE_NAME, Settings};
pub use types::{Color, DebugOverlayConfig, LogLevel, OverlayColors};

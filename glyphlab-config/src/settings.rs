//! Settings persistence.
//!
//! Covers:
//! - `load` / `load_from` (lenient JSON read, defaults on any failure)
//! - `read_from` (strict read for callers that want the error)
//! - `save` / `save_to` (atomic write: temp file then rename)
//! - Path helpers (`settings_dir`, `settings_path`)

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{Color, DebugOverlayConfig, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the settings file inside the settings directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted application settings.
///
/// Only `font_path` existed in the first settings format; every other field
/// has a serde default so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Directory scanned for `.ttf` / `.otf` files.
    #[serde(rename = "font_path", default = "defaults::font_dir")]
    pub font_dir: PathBuf,

    /// Pixel size applied to newly opened fonts.
    #[serde(default = "defaults::font_size")]
    pub font_size: u32,

    #[serde(default = "defaults::foreground")]
    pub foreground: Color,

    #[serde(default = "defaults::background")]
    pub background: Color,

    #[serde(default)]
    pub debug_overlay: DebugOverlayConfig,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_dir: defaults::font_dir(),
            font_size: defaults::font_size(),
            foreground: defaults::foreground(),
            background: defaults::background(),
            debug_overlay: DebugOverlayConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Platform settings directory, e.g. `~/.config/glyphlab`.
    pub fn settings_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glyphlab"))
    }

    /// Full path of the settings file.
    pub fn settings_path() -> Option<PathBuf> {
        Self::settings_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
    }

    /// Load settings from the platform settings path.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No settings directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from `path`.
    ///
    /// An absent file is not an error. A file that cannot be read or parsed is
    /// logged and ignored. In both cases the defaults are returned.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Settings file {:?} not found, using defaults", path);
            return Self::default();
        }

        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::error!("Error reading settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Strictly read and parse `path`.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&contents)?;
        settings.set_font_size(settings.font_size);
        Ok(settings)
    }

    /// Save to the platform settings path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::settings_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, overwriting any existing file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Builder-style font directory override.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dir = dir.into();
        self
    }

    /// Set the pixel size, clamped to the selectable range.
    pub fn set_font_size(&mut self, size: u32) {
        let clamped = size.clamp(defaults::MIN_FONT_SIZE, defaults::MAX_FONT_SIZE);
        if clamped != size {
            log::warn!(
                "Font size {} out of range, clamped to {}",
                size,
                clamped
            );
        }
        self.font_size = clamped;
    }
}
